// SPDX-License-Identifier: PMPL-1.0-or-later
//! Embedded media analyzer - WCAG 1.2.1 Audio-only (Level A), 1.2.2
//! Captions (Level A), 1.4.2 Audio Control (Level A)
//!
//! Checks `<video>` and `<audio>` elements in a page:
//! - Video has a captions/subtitles track
//! - Audio has a transcript reference
//! - Auto-playing media can be paused/stopped
//!
//! Requirements for uploaded media files live in [`crate::media`].

use crate::analyzers::{selector, Analyzer, Page};
use crate::findings::{criteria, Finding, ImpactAssessment, Severity};

/// Media accessibility analyzer
pub struct MediaAnalyzer;

impl Analyzer for MediaAnalyzer {
    fn name(&self) -> &str {
        "Media Accessibility Analyzer"
    }

    fn description(&self) -> &str {
        "Checks video/audio elements for captions, transcripts, and autoplay (WCAG 1.2.1, 1.2.2, 1.4.2)"
    }

    fn analyze(&self, page: &Page<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        check_video_captions(page, &mut findings);
        check_audio_transcript(page, &mut findings);
        check_autoplay(page, &mut findings);

        findings
    }
}

fn check_video_captions(page: &Page<'_>, findings: &mut Vec<Finding>) {
    let track_sel = selector("track");

    for video in page.document.select(&selector("video")) {
        let has_captions = video.select(&track_sel).any(|track| {
            matches!(track.value().attr("kind"), Some("captions" | "subtitles"))
        });
        if has_captions {
            continue;
        }

        findings.push(page.locate(
            Finding::new(
                "WCAG-1.2.2-video-no-captions",
                Severity::Error,
                "Video element has no captions or subtitles track. Deaf and hard-of-hearing users cannot access audio content.",
            )
            .with_criterion(criteria::CAPTIONS)
            .with_rule_name("Captions (Prerecorded): Missing Video Captions")
            .with_element("video")
            .with_suggestion(
                "Add <track kind=\"captions\" src=\"captions.vtt\" srclang=\"en\" label=\"English\"> inside the <video> element",
            )
            .as_fixable()
            .with_impact(ImpactAssessment::deaf()),
            page.line_of_element(video),
        ));
    }
}

fn check_audio_transcript(page: &Page<'_>, findings: &mut Vec<Finding>) {
    for audio in page.document.select(&selector("audio")) {
        let el = audio.value();
        let has_transcript_ref = el.attr("aria-describedby").is_some()
            || el
                .attr("aria-label")
                .is_some_and(|label| label.to_lowercase().contains("transcript"));
        if has_transcript_ref {
            continue;
        }

        findings.push(page.locate(
            Finding::new(
                "WCAG-1.2.1-audio-no-transcript",
                Severity::Warning,
                "Audio element has no transcript reference. Provide a text transcript for deaf and hard-of-hearing users.",
            )
            .with_criterion(criteria::AUDIO_VIDEO_ONLY)
            .with_rule_name("Audio-only: Missing Transcript")
            .with_element("audio")
            .with_suggestion(
                "Add a transcript section and link it with aria-describedby, or provide a link to the transcript near the audio element",
            )
            .with_impact(ImpactAssessment::deaf()),
            page.line_of_element(audio),
        ));
    }
}

/// Autoplaying media without controls; muted media only warns
fn check_autoplay(page: &Page<'_>, findings: &mut Vec<Finding>) {
    for media in page.document.select(&selector("video[autoplay], audio[autoplay]")) {
        let el = media.value();
        if el.attr("controls").is_some() {
            continue;
        }
        let tag = el.name();
        let severity = if el.attr("muted").is_some() { Severity::Warning } else { Severity::Error };

        findings.push(page.locate(
            Finding::new(
                "WCAG-1.4.2-autoplay-no-controls",
                severity,
                &format!(
                    "<{}> has autoplay but no controls attribute. Users must be able to pause or stop auto-playing media.",
                    tag
                ),
            )
            .with_criterion(criteria::AUDIO_CONTROL)
            .with_rule_name("Audio Control: Autoplay Without Controls")
            .with_element(tag)
            .with_code(media.html())
            .with_suggestion(format!(
                "Add the 'controls' attribute to the <{}> element so users can pause/stop playback",
                tag
            ))
            .as_fixable()
            .with_impact(ImpactAssessment::cognitive()),
            page.line_of_element(media),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rule<'a>(findings: &'a [Finding], rule: &str) -> Vec<&'a Finding> {
        findings.iter().filter(|f| f.rule_id == rule).collect()
    }

    #[test]
    fn test_video_with_captions() {
        let html = r#"
            <html><body>
                <video>
                    <source src="video.mp4" type="video/mp4">
                    <track kind="captions" src="captions.vtt" srclang="en" label="English">
                </video>
            </body></html>
        "#;
        let findings = MediaAnalyzer.analyze(&Page::parse(html));
        assert!(with_rule(&findings, "WCAG-1.2.2-video-no-captions").is_empty());
    }

    #[test]
    fn test_video_no_captions() {
        let html = "<html><body>\n<p>intro</p>\n<video>\n<source src=\"video.mp4\" type=\"video/mp4\">\n</video>\n</body></html>";
        let findings = MediaAnalyzer.analyze(&Page::parse(html));
        let captions = with_rule(&findings, "WCAG-1.2.2-video-no-captions");
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].severity, Severity::Error);
        assert_eq!(captions[0].line, Some(3));
    }

    #[test]
    fn test_autoplay() {
        let loud = MediaAnalyzer.analyze(&Page::parse(
            r#"<html><body><video autoplay src="bg.mp4"></video></body></html>"#,
        ));
        let loud = with_rule(&loud, "WCAG-1.4.2-autoplay-no-controls");
        assert_eq!(loud.len(), 1);
        assert_eq!(loud[0].severity, Severity::Error);

        let muted = MediaAnalyzer.analyze(&Page::parse(
            r#"<html><body><video autoplay muted src="bg.mp4"></video></body></html>"#,
        ));
        assert_eq!(with_rule(&muted, "WCAG-1.4.2-autoplay-no-controls")[0].severity, Severity::Warning);

        let controlled = MediaAnalyzer.analyze(&Page::parse(
            r#"<html><body><video autoplay controls src="vid.mp4"></video></body></html>"#,
        ));
        assert!(with_rule(&controlled, "WCAG-1.4.2-autoplay-no-controls").is_empty());
    }

    #[test]
    fn test_audio_transcript_reference() {
        let missing = MediaAnalyzer.analyze(&Page::parse(
            r#"<html><body><audio src="podcast.mp3" controls></audio></body></html>"#,
        ));
        assert_eq!(with_rule(&missing, "WCAG-1.2.1-audio-no-transcript").len(), 1);

        let linked = MediaAnalyzer.analyze(&Page::parse(
            r#"<html><body><audio src="p.mp3" controls aria-describedby="t"></audio><div id="t">...</div></body></html>"#,
        ));
        assert!(linked.is_empty());
    }
}
