// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility requirements and remediation material for uploaded media.
//!
//! Uploaded audio and video cannot be inspected for content here, so the
//! checks report which WCAG 1.2.x alternatives each media type needs. The
//! caption track, audio descriptions and sign language guidance are fixed
//! demonstration material returned by the media endpoints.

use crate::findings::{criteria, Criterion, Severity};
use serde::Serialize;

/// Kind of time-based media, derived from a MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// `audio/*` or `video/*`; anything else is not media
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("audio/") {
            Some(MediaKind::Audio)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A missing media alternative
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaIssue {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub issue: String,
    pub wcag_criteria: String,
    pub severity: Severity,
    pub remediation: &'static str,
}

impl MediaIssue {
    fn new(
        id: &'static str,
        kind: MediaKind,
        issue: String,
        criterion: Criterion,
        remediation: &'static str,
    ) -> Self {
        Self {
            id,
            kind,
            issue,
            wcag_criteria: criterion.title(),
            severity: Severity::Error,
            remediation,
        }
    }
}

/// Alternatives an uploaded file of this kind must ship with
pub fn media_issues(kind: MediaKind) -> Vec<MediaIssue> {
    let mut issues = vec![MediaIssue::new(
        "transcript",
        kind,
        format!("No transcript provided for {} content", kind),
        criteria::AUDIO_VIDEO_ONLY,
        "Generate and provide a transcript for the media content",
    )];

    if kind == MediaKind::Video {
        let video = |id, issue: &str, criterion, remediation| {
            MediaIssue::new(id, MediaKind::Video, issue.to_string(), criterion, remediation)
        };
        issues.extend([
            video(
                "captions",
                "No captions provided for video content",
                criteria::CAPTIONS,
                "Generate and provide synchronized captions for the video",
            ),
            video(
                "audio-description",
                "No audio description provided for video content",
                criteria::AUDIO_DESCRIPTION_OR_ALTERNATIVE,
                "Generate and provide audio descriptions for visual information in the video",
            ),
            video(
                "sign-language",
                "No sign language interpretation provided for video content",
                criteria::SIGN_LANGUAGE,
                "Provide sign language interpretation for the audio content in the video",
            ),
            video(
                "extended-audio-description",
                "No extended audio description provided for video content",
                criteria::EXTENDED_AUDIO_DESCRIPTION,
                "Provide extended audio descriptions for visual information in the video",
            ),
            video(
                "media-alternative",
                "No media alternative provided for video content",
                criteria::MEDIA_ALTERNATIVE,
                "Provide a text alternative for the entire video content",
            ),
        ]);
    }

    issues
}

/// One timed caption cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    pub start: &'static str,
    pub end: &'static str,
    pub text: &'static str,
}

const CAPTION_TRACK: &[(&str, &str, &str)] = &[
    ("00:00:00", "00:00:05", "Welcome to the WCAG 2.1 AAA Compliance Tutorial"),
    ("00:00:06", "00:00:10", "In this video, we will explore how to make your content accessible"),
    ("00:00:11", "00:00:15", "Let's start by looking at the key principles of accessibility"),
    ("00:00:16", "00:00:20", "The first principle is Perceivable"),
    ("00:00:21", "00:00:25", "This means users must be able to perceive the information being presented"),
    ("00:00:26", "00:00:30", "The second principle is Operable"),
    ("00:00:31", "00:00:35", "Users must be able to operate the interface"),
    ("00:00:36", "00:00:40", "The third principle is Understandable"),
    ("00:00:41", "00:00:45", "Information and operation of the interface must be understandable"),
    ("00:00:46", "00:00:50", "The fourth principle is Robust"),
    ("00:00:51", "00:00:55", "Content must be robust enough to work with various technologies"),
    ("00:00:56", "00:01:00", "Now let's look at some examples of accessible design"),
];

pub fn caption_track() -> Vec<Caption> {
    CAPTION_TRACK
        .iter()
        .map(|&(start, end, text)| Caption { start, end, text })
        .collect()
}

/// Narration of visual content at a time code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDescription {
    pub time_code: &'static str,
    pub description: &'static str,
}

const AUDIO_DESCRIPTIONS: &[(&str, &str)] = &[
    ("00:00:20", "The screen shows a diagram of the four WCAG principles: Perceivable, Operable, Understandable, and Robust, arranged in a circle."),
    ("00:01:05", "A demonstration of color contrast checking is shown, with a tool highlighting low-contrast text on a webpage."),
    ("00:02:30", "A person using a screen reader navigates through a properly structured webpage with headings and landmarks."),
    ("00:03:15", "A comparison of two forms is displayed: one with clear labels and error messages, and one without accessible features."),
    ("00:04:00", "The presenter points to a chart showing statistics on disability types and the percentage of users affected by inaccessible content."),
];

pub fn audio_descriptions() -> Vec<AudioDescription> {
    AUDIO_DESCRIPTIONS
        .iter()
        .map(|&(time_code, description)| AudioDescription { time_code, description })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignLanguageOption {
    pub id: &'static str,
    pub name: &'static str,
}

/// Whether sign language interpretation is needed, and how to provide it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignLanguageGuidance {
    pub required: bool,
    pub message: &'static str,
    pub options: Vec<SignLanguageOption>,
}

pub fn sign_language_guidance(has_speech: bool) -> SignLanguageGuidance {
    if has_speech {
        SignLanguageGuidance {
            required: true,
            message: "This video contains speech and requires sign language interpretation for WCAG 2.1 AAA compliance.",
            options: vec![
                SignLanguageOption { id: "option-1", name: "Add sign language video overlay" },
                SignLanguageOption { id: "option-2", name: "Provide separate sign language version" },
            ],
        }
    } else {
        SignLanguageGuidance {
            required: false,
            message: "This video does not contain speech, so sign language interpretation is not required.",
            options: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("audio/mpeg"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_mime("Video/MP4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("image/png"), None);
    }

    #[test]
    fn test_audio_needs_only_transcript() {
        let issues = media_issues(MediaKind::Audio);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "transcript");
        assert_eq!(issues[0].issue, "No transcript provided for audio content");
        assert_eq!(issues[0].wcag_criteria, "1.2.1 Audio-only and Video-only (Prerecorded)");
    }

    #[test]
    fn test_video_needs_full_set() {
        let ids: Vec<_> = media_issues(MediaKind::Video).iter().map(|i| i.id).collect();
        assert_eq!(
            ids,
            [
                "transcript",
                "captions",
                "audio-description",
                "sign-language",
                "extended-audio-description",
                "media-alternative"
            ]
        );
    }

    #[test]
    fn test_issue_serializes_type_field() {
        let json = serde_json::to_value(&media_issues(MediaKind::Video)[1]).expect("serialize");
        assert_eq!(json["type"], "video");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["wcagCriteria"], "1.2.2 Captions (Prerecorded)");
    }

    #[test]
    fn test_fixed_material() {
        assert_eq!(caption_track().len(), 12);
        assert_eq!(audio_descriptions().len(), 5);
        assert!(sign_language_guidance(true).required);
        assert!(sign_language_guidance(false).options.is_empty());
    }
}
