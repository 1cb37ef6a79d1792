//! Ordered, renderable record of a run.

use chrono::NaiveTime;

use crate::event::{InputEvent, OutputEvent};

/// How times and fields are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    /// `chrono` strftime pattern, e.g. `%H:%M`.
    pub time_format: String,
    pub separator: String,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            time_format: "%H:%M".to_string(),
            separator: " ".to_string(),
        }
    }
}

impl LineFormat {
    pub fn time(&self, at: NaiveTime) -> String {
        at.format(&self.time_format).to_string()
    }
}

/// One line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Opening time marker.
    Opened(NaiveTime),
    /// Echo of a processed input row.
    Received(InputEvent),
    /// Event emitted by the club.
    Emitted(OutputEvent),
    /// Closing time marker.
    Closed(NaiveTime),
}

impl Line {
    /// Renders `<time>`, or `<time><sep><kind><sep><payload>` for events.
    pub fn render(&self, format: &LineFormat) -> String {
        let sep = &format.separator;
        match self {
            Self::Opened(at) | Self::Closed(at) => format.time(*at),
            Self::Received(event) => format!(
                "{}{sep}{}{sep}{}",
                format.time(event.happens_at),
                event.action.kind(),
                event.action.render(sep)
            ),
            Self::Emitted(event) => format!(
                "{}{sep}{}{sep}{}",
                format.time(event.happens_at()),
                event.kind(),
                event.render_payload(sep)
            ),
        }
    }
}

/// Lines of a run in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<Line>,
}

impl Transcript {
    /// Starts a transcript with the opening marker.
    pub fn opened(at: NaiveTime) -> Self {
        Self {
            lines: vec![Line::Opened(at)],
        }
    }

    pub fn received(&mut self, event: InputEvent) {
        self.lines.push(Line::Received(event));
    }

    pub fn emitted(&mut self, events: impl IntoIterator<Item = OutputEvent>) {
        self.lines.extend(events.into_iter().map(Line::Emitted));
    }

    pub fn closed(&mut self, at: NaiveTime) {
        self.lines.push(Line::Closed(at));
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Every line rendered with `format`.
    pub fn render(&self, format: &LineFormat) -> Vec<String> {
        self.lines.iter().map(|line| line.render(format)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::event::{ClientAction, Rejection};
    use crate::types::ClientName;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample() -> Transcript {
        let name = ClientName::new("client1").unwrap();
        let mut transcript = Transcript::opened(hm(9, 0));
        transcript.received(InputEvent::new(
            hm(9, 54),
            ClientAction::Sit {
                name: name.clone(),
                table: 1,
            },
        ));
        transcript.emitted([
            OutputEvent::Error {
                at: hm(9, 54),
                reason: Rejection::TableBusy,
            },
            OutputEvent::ClientSat {
                at: hm(9, 54),
                name: name.clone(),
                table: 2,
            },
        ]);
        transcript.emitted([OutputEvent::ClientLeft { at: hm(19, 0), name }]);
        transcript.closed(hm(19, 0));
        transcript
    }

    #[test]
    fn renders_with_default_format() {
        let output = sample().render(&LineFormat::default()).join("\n");

        assert_snapshot!(output, @r"
        09:00
        09:54 2 client1 1
        09:54 13 PlaceIsBusy
        09:54 12 client1 2
        19:00 11 client1
        19:00
        ");
    }

    #[test]
    fn renders_with_custom_format() {
        let format = LineFormat {
            time_format: "%H.%M".to_string(),
            separator: ";".to_string(),
        };
        let output = sample().render(&format).join("\n");

        assert_snapshot!(output, @r"
        09.00
        09.54;2;client1;1
        09.54;13;PlaceIsBusy
        09.54;12;client1;2
        19.00;11;client1
        19.00
        ");
    }

    #[test]
    fn starts_and_ends_with_markers() {
        let transcript = sample();
        let lines = transcript.lines();

        assert_eq!(lines.first(), Some(&Line::Opened(hm(9, 0))));
        assert_eq!(lines.last(), Some(&Line::Closed(hm(19, 0))));
    }
}
