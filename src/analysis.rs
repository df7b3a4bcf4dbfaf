//! Breakdown of the `Titre: ... | Situation: ... | Choix: a|b|c` story format.
//!
//! The same `|` separates the top-level fields and the choices. The `Choix:`
//! label therefore always closes the top-level sequence: everything after it
//! belongs to the choices.

pub const SEPARATOR: char = '|';
pub const TITLE_LABEL: &str = "Titre:";
pub const SITUATION_LABEL: &str = "Situation:";
pub const CHOICES_LABEL: &str = "Choix:";

/// Number of choices the prompt asks for.
pub const EXPECTED_CHOICES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Trimmed segment text, label included.
    pub content: String,
    /// Set on the `Choix:` segment only.
    pub choices: Option<Vec<String>>,
}

impl Segment {
    fn plain(content: &str) -> Self {
        Self {
            content: content.to_string(),
            choices: None,
        }
    }

    fn with_choices(content: &str) -> Self {
        let remainder = content
            .strip_prefix(CHOICES_LABEL)
            .unwrap_or(content)
            .trim_start();
        let choices = remainder
            .split(SEPARATOR)
            .map(|choice| choice.trim().to_string())
            .collect();

        Self {
            content: content.to_string(),
            choices: Some(choices),
        }
    }

    /// Segment text with `label` and the whitespace after it removed.
    pub(crate) fn value_of(&self, label: &str) -> Option<&str> {
        self.content
            .strip_prefix(label)
            .map(|value| value.trim_start())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// The text has no separator at all.
    Unformatted,
    Segmented(Vec<Segment>),
}

pub fn analyze(text: &str) -> Analysis {
    if !text.contains(SEPARATOR) {
        return Analysis::Unformatted;
    }

    let mut segments = Vec::new();
    let mut rest = text;

    loop {
        if rest.trim_start().starts_with(CHOICES_LABEL) {
            segments.push(Segment::with_choices(rest.trim()));
            break;
        }

        match rest.split_once(SEPARATOR) {
            Some((head, tail)) => {
                segments.push(Segment::plain(head.trim()));
                rest = tail;
            }
            None => {
                segments.push(Segment::plain(rest.trim()));
                break;
            }
        }
    }

    Analysis::Segmented(segments)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deviation {
    MissingSeparator,
    MissingTitle,
    MissingSituation,
    MissingChoices,
    ChoiceCount(usize),
    EmptyChoice(usize),
}

impl std::fmt::Display for Deviation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Deviation::MissingSeparator => write!(f, "no '{}' separator", SEPARATOR),
            Deviation::MissingTitle => write!(f, "no segment labelled '{}'", TITLE_LABEL),
            Deviation::MissingSituation => {
                write!(f, "no segment labelled '{}'", SITUATION_LABEL)
            }
            Deviation::MissingChoices => write!(f, "no segment labelled '{}'", CHOICES_LABEL),
            Deviation::ChoiceCount(count) => {
                write!(f, "{} choices instead of {}", count, EXPECTED_CHOICES)
            }
            Deviation::EmptyChoice(number) => write!(f, "choice {} is empty", number),
        }
    }
}

/// Fields of a story as the backend would read them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Story {
    pub title: Option<String>,
    pub situation: Option<String>,
    pub choices: Option<Vec<String>>,
    separated: bool,
}

impl Story {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let segments = match analysis {
            Analysis::Unformatted => return Self::default(),
            Analysis::Segmented(segments) => segments,
        };

        let mut story = Self {
            separated: true,
            ..Default::default()
        };

        // First occurrence of each label wins.
        for segment in segments {
            if let Some(choices) = &segment.choices {
                story.choices.get_or_insert_with(|| choices.clone());
            } else if let Some(title) = segment.value_of(TITLE_LABEL) {
                story.title.get_or_insert_with(|| title.to_string());
            } else if let Some(situation) = segment.value_of(SITUATION_LABEL) {
                story.situation.get_or_insert_with(|| situation.to_string());
            }
        }

        story
    }

    /// Every way this story departs from the format the prompt asks for.
    /// Empty when the story conforms.
    pub fn deviations(&self) -> Vec<Deviation> {
        if !self.separated {
            return vec![Deviation::MissingSeparator];
        }

        let mut deviations = Vec::new();

        if self.title.is_none() {
            deviations.push(Deviation::MissingTitle);
        }
        if self.situation.is_none() {
            deviations.push(Deviation::MissingSituation);
        }

        match &self.choices {
            None => deviations.push(Deviation::MissingChoices),
            Some(choices) => {
                if choices.len() != EXPECTED_CHOICES {
                    deviations.push(Deviation::ChoiceCount(choices.len()));
                }
                for (index, choice) in choices.iter().enumerate() {
                    if choice.is_empty() {
                        deviations.push(Deviation::EmptyChoice(index + 1));
                    }
                }
            }
        }

        deviations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmented(analysis: Analysis) -> Vec<Segment> {
        match analysis {
            Analysis::Segmented(segments) => segments,
            Analysis::Unformatted => panic!("expected a segmented analysis"),
        }
    }

    #[test]
    fn text_without_separator_is_unformatted() {
        assert_eq!(analyze("Just a story, no fields."), Analysis::Unformatted);
        assert_eq!(analyze(""), Analysis::Unformatted);
    }

    #[test]
    fn sample_response_has_three_segments_and_three_choices() {
        let segments = segmented(analyze("Titre: T | Situation: S | Choix: A|B|C"));

        let contents: Vec<&str> = segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["Titre: T", "Situation: S", "Choix: A|B|C"]);

        assert_eq!(segments[0].choices, None);
        assert_eq!(segments[1].choices, None);
        assert_eq!(
            segments[2].choices,
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn choices_label_on_a_new_line_is_recognised() {
        let text = "Titre: La forêt | Situation: Un incendie menace. |\nChoix: Alerter | Fuir |Aider\n";
        let segments = segmented(analyze(text));

        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[2].choices,
            Some(vec![
                "Alerter".to_string(),
                "Fuir".to_string(),
                "Aider".to_string()
            ])
        );
    }

    #[test]
    fn fewer_choices_are_reported_as_found() {
        let segments = segmented(analyze("Titre: T | Situation: S | Choix: only one"));
        assert_eq!(segments[2].choices, Some(vec!["only one".to_string()]));

        let segments = segmented(analyze("Titre: T | Situation: S | Choix: A|B"));
        assert_eq!(segments[2].choices.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn more_choices_are_reported_as_found() {
        let segments = segmented(analyze("Titre: T | Choix: A|B|C|D|E"));
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].choices.as_ref().map(Vec::len), Some(5));
    }

    #[test]
    fn text_without_choices_label_is_split_on_every_separator() {
        let segments = segmented(analyze(" a | b || c "));

        let contents: Vec<&str> = segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "", "c"]);
        assert!(segments.iter().all(|s| s.choices.is_none()));
    }

    #[test]
    fn segments_are_already_trimmed() {
        let segments = segmented(analyze("  Titre:  T  |\tSituation: S \n| Choix:  A | B |C  "));

        for segment in &segments {
            assert_eq!(segment.content.trim(), segment.content);
            for choice in segment.choices.iter().flatten() {
                assert_eq!(choice.trim(), choice);
            }
        }
    }

    #[test]
    fn conforming_story_has_no_deviations() {
        let story = Story::from_analysis(&analyze("Titre: T | Situation: S | Choix: A|B|C"));

        assert_eq!(story.title.as_deref(), Some("T"));
        assert_eq!(story.situation.as_deref(), Some("S"));
        assert!(story.deviations().is_empty());
    }

    #[test]
    fn story_deviations_are_all_listed() {
        let story = Story::from_analysis(&analyze("Title: T | Choix: A||"));

        assert_eq!(
            story.deviations(),
            vec![
                Deviation::MissingTitle,
                Deviation::MissingSituation,
                Deviation::EmptyChoice(2),
                Deviation::EmptyChoice(3),
            ]
        );
    }

    #[test]
    fn unformatted_story_only_misses_the_separator() {
        let story = Story::from_analysis(&analyze("Titre: T Situation: S"));
        assert_eq!(story.deviations(), vec![Deviation::MissingSeparator]);
    }

    #[test]
    fn wrong_choice_count_is_a_deviation() {
        let story = Story::from_analysis(&analyze("Titre: T | Situation: S | Choix: A|B"));
        assert_eq!(story.deviations(), vec![Deviation::ChoiceCount(2)]);
    }
}
