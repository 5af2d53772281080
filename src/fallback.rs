// SPDX-License-Identifier: PMPL-1.0-or-later
//! Template-backed alt text and transcripts, used when no AI assistant is
//! configured or when the assistant call fails.

use crate::media::MediaKind;
use crate::templates::{IndexSelector, RandomSelector, TemplateBank};
use std::path::Path;
use std::sync::Arc;

const SUBJECT_ALT_TEXT: &[&str] = &[
    "{subject} displayed prominently against a clean background",
    "Close-up view of {subject} showing details and features",
    "{subject} in use, demonstrating its functionality",
    "Illustration of {subject} with labeled components",
    "{subject} shown from multiple angles",
];

const GENERIC_ALT_TEXT: &[&str] = &[
    "Product image showing details and features",
    "Informational diagram explaining the concept",
    "Person demonstrating how to use the product",
    "Screenshot of the application interface",
    "Illustration of the process described in the text",
];

const AUDIO_TRANSCRIPTS: &[&str] = &[
    "Welcome to our accessibility tool. This application helps you identify and fix accessibility issues in your digital content. By using this tool, you can ensure that your website, documents, and media are accessible to everyone, including people with disabilities.",
    "In this tutorial, we'll explore the key principles of web accessibility. We'll cover topics like semantic HTML, proper use of ARIA attributes, and ensuring sufficient color contrast. By the end, you'll have a better understanding of how to make your web content more accessible.",
    "Today we're discussing the importance of alternative text for images. Alt text provides a textual alternative to non-text content in web pages. Screen readers read this text aloud, helping visually impaired users understand the content. Remember to keep your alt text concise and descriptive.",
];

const VIDEO_TRANSCRIPTS: &[&str] = &[
    "Welcome to our video tutorial on WCAG 2.1 AAA compliance. In this video, we'll demonstrate how to make your digital content accessible to everyone. [Visual: Presenter standing in front of a digital screen showing accessibility icons] First, let's talk about the four principles of accessibility: perceivable, operable, understandable, and robust. [Visual: Four icons appear on screen representing each principle]",
    "This demonstration shows how screen readers interpret web content. [Visual: Computer screen showing a webpage with a screen reader highlighting elements] Notice how the screen reader announces headings, links, and image descriptions. [Visual: Screen reader moving through the page, highlighting different elements] This is why proper HTML structure and alt text are so important for accessibility.",
    "In this video, we'll show you how to check color contrast for accessibility. [Visual: Person using a color contrast checker tool] The WCAG 2.1 AAA standard requires a contrast ratio of at least 7:1 for normal text. [Visual: Example of text with good and bad contrast] Let's look at some examples of accessible and inaccessible color combinations.",
];

/// Offline generator for alt text and transcripts
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    subject_alt: TemplateBank,
    generic_alt: TemplateBank,
    audio_transcripts: TemplateBank,
    video_transcripts: TemplateBank,
}

impl FallbackGenerator {
    pub fn new(selector: Arc<dyn IndexSelector>) -> Self {
        Self {
            subject_alt: TemplateBank::new(SUBJECT_ALT_TEXT.iter().copied(), selector.clone()),
            generic_alt: TemplateBank::new(GENERIC_ALT_TEXT.iter().copied(), selector.clone()),
            audio_transcripts: TemplateBank::new(AUDIO_TRANSCRIPTS.iter().copied(), selector.clone()),
            video_transcripts: TemplateBank::new(VIDEO_TRANSCRIPTS.iter().copied(), selector),
        }
    }

    /// Alt text built from the words of an image file name, or a generic
    /// description when the name has none
    pub fn alt_text(&self, file_name: &str) -> String {
        let rendered = match subject_from_file_name(file_name) {
            Some(subject) => self.subject_alt.render(&[("subject", &subject)]),
            None => self.generic_alt.choose().map(str::to_string),
        };
        rendered.unwrap_or_default()
    }

    pub fn transcript(&self, kind: MediaKind) -> String {
        let bank = match kind {
            MediaKind::Audio => &self.audio_transcripts,
            MediaKind::Video => &self.video_transcripts,
        };
        bank.choose().unwrap_or_default().to_string()
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(Arc::new(RandomSelector))
    }
}

/// "red-sports_car.jpg" → "Red Sports Car", "heroBanner.png" → "Hero Banner".
/// Single-letter fragments are dropped.
pub fn subject_from_file_name(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name).file_stem()?.to_string_lossy();

    let mut spaced = String::with_capacity(stem.len() + 8);
    for ch in stem.chars() {
        match ch {
            '_' | '-' => spaced.push(' '),
            c if c.is_uppercase() => {
                spaced.push(' ');
                spaced.push(c);
            }
            c => spaced.push(c),
        }
    }

    let words: Vec<String> = spaced
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .map(capitalize)
        .collect();

    (!words.is_empty()).then(|| words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::FixedSelector;

    #[test]
    fn test_subject_from_file_name() {
        assert_eq!(subject_from_file_name("red-sports_car.jpg").as_deref(), Some("Red Sports Car"));
        assert_eq!(subject_from_file_name("heroBanner.png").as_deref(), Some("Hero Banner"));
        assert_eq!(subject_from_file_name("images/a-b.png"), None);
        assert_eq!(subject_from_file_name(""), None);
    }

    #[test]
    fn test_alt_text_uses_subject_template() {
        let generator = FallbackGenerator::new(Arc::new(FixedSelector(1)));
        assert_eq!(
            generator.alt_text("mountain_lake.jpg"),
            "Close-up view of Mountain Lake showing details and features"
        );
    }

    #[test]
    fn test_alt_text_falls_back_to_generic() {
        let generator = FallbackGenerator::new(Arc::new(FixedSelector(3)));
        assert_eq!(generator.alt_text("x.png"), "Screenshot of the application interface");
    }

    #[test]
    fn test_transcript_by_kind() {
        let generator = FallbackGenerator::new(Arc::new(FixedSelector(0)));
        assert!(generator.transcript(MediaKind::Audio).starts_with("Welcome to our accessibility tool"));
        assert!(generator.transcript(MediaKind::Video).contains("[Visual:"));
    }
}
