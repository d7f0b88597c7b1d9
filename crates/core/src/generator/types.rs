//! Slide and request types for generation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The flavor of carousel to generate. Selects the prompt pair and the
/// slide count the model is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselKind {
    /// Standard 2-slide concept explainer (what/why/syntax + interview questions).
    Topic,
    /// 5-slide weekly quiz (4 questions + answers).
    Quiz,
    /// 3-slide "guess the output" challenge (code, hint, answer).
    GuessOutput,
    /// 2-slide logic puzzle (question/rules + step-by-step solution).
    LogicPuzzle,
}

impl CarouselKind {
    /// Infer the kind from a topic's name and category.
    pub fn for_topic(name: &str, category: &str) -> Self {
        let haystack = format!("{} {}", name, category).to_lowercase();
        if haystack.contains("quiz") {
            CarouselKind::Quiz
        } else if haystack.contains("guess") && haystack.contains("output") {
            CarouselKind::GuessOutput
        } else if haystack.contains("puzzle") || haystack.contains("logic") {
            CarouselKind::LogicPuzzle
        } else {
            CarouselKind::Topic
        }
    }

    /// Number of slides the prompt asks the model for.
    pub fn expected_slides(&self) -> usize {
        match self {
            CarouselKind::Topic => 2,
            CarouselKind::Quiz => 5,
            CarouselKind::GuessOutput => 3,
            CarouselKind::LogicPuzzle => 2,
        }
    }

    /// Whether the slide count must match exactly, or extra/missing slides
    /// are tolerated as long as at least one is usable.
    pub fn strict_count(&self) -> bool {
        matches!(self, CarouselKind::Topic)
    }

    pub(crate) fn temperature(&self) -> f32 {
        match self {
            CarouselKind::Topic => 0.2,
            CarouselKind::Quiz => 0.4,
            CarouselKind::GuessOutput | CarouselKind::LogicPuzzle => 0.3,
        }
    }

    pub(crate) fn max_tokens(&self) -> u32 {
        match self {
            CarouselKind::Topic => 700,
            CarouselKind::Quiz => 1200,
            CarouselKind::GuessOutput | CarouselKind::LogicPuzzle => 1000,
        }
    }

    pub(crate) fn system_prompt(&self) -> &'static str {
        match self {
            CarouselKind::Topic => {
                "You are a concise computer science teacher. \
                 Generate slide content for an Instagram carousel. \
                 Output must be valid JSON in this exact structure:\n\
                 {\"slides\": [{\"heading\": \"...\", \"body\": \"...\"}, {...}]}\n\
                 Rules:\n\
                 1. Return EXACTLY 2 slides.\n\
                 2. Slide 1: What/Why/When + Syntax (with a small python code snippet in markdown) \
                 plus a one-line mention of time and space complexity as tc and sc.\n\
                 3. Slide 2: 6 top interview questions and problems to solve, ending with a small analogy.\n\
                 4. Output ONLY valid JSON, no text outside JSON."
            }
            CarouselKind::Quiz => {
                "You are an expert computer science teacher creating Instagram quiz content. \
                 Generate EXACTLY 5 slides in valid JSON format: \
                 {\"slides\": [{\"heading\": \"...\", \"body\": \"...\"}, ...]} \
                 Output ONLY valid JSON, no extra text."
            }
            CarouselKind::GuessOutput => {
                "You are an expert Python educator creating Instagram 'Guess the Output' content. \
                 All code MUST be syntactically correct and actually executable. \
                 Generate EXACTLY 3 slides in valid JSON format: \
                 {\"slides\": [{\"heading\": \"...\", \"body\": \"...\"}, ...]} \
                 Do NOT include any text outside JSON. Keep all code in markdown blocks (```)."
            }
            CarouselKind::LogicPuzzle => {
                "You are a professional logic and reasoning teacher who creates clean, \
                 step-by-step educational Instagram carousels. Each rule or step must appear \
                 on a separate line. Generate EXACTLY 2 slides in valid JSON format: \
                 {\"slides\": [{\"heading\": \"...\", \"body\": \"...\"}, {...}]}\n\
                 Slide 1: puzzle question and rules, one idea per line.\n\
                 Slide 2: heading 'Solution & Key Takeaway' with numbered reasoning steps \
                 and a final 'Key Point to Remember:' line.\n\
                 The 'body' field must be a single STRING. Output ONLY valid JSON."
            }
        }
    }

    pub(crate) fn user_prompt(&self, topic: &str) -> String {
        match self {
            CarouselKind::Topic => format!(
                "Create EXACTLY 2 slides for Instagram about: {}. \
                 Slide 1: What & Why & When + Syntax (python snippet included) with a one-line \
                 mention of time and space complexity as tc and sc. \
                 Slide 2: Important Interview Questions and problems to solve \
                 (6 concise bullet points) with a small analogy. \
                 Output ONLY valid JSON according to structure \
                 {{\"slides\":[{{\"heading\":\"\",\"body\":\"\"}},{{\"heading\":\"\",\"body\":\"\"}}]}}",
                topic
            ),
            CarouselKind::Quiz => format!(
                "Create a 5-slide 'Weekly Quiz Challenge' about {}. \
                 Slides 1-4: one question each with 4 multiple-choice options (A, B, C, D), \
                 only one correct. Each question slide: heading 'Question X', body with the \
                 question followed by the options on separate lines. \
                 Slide 5: title 'Answers & Explanations' with all 4 correct answers and a \
                 one-line explanation each, ending with 'Comment your score below'. \
                 Return valid JSON with exactly 5 slides.",
                topic
            ),
            CarouselKind::GuessOutput => format!(
                "Create a 3-slide 'Guess the Output' carousel about: {}. \
                 The code snippet MUST be a correct, working example (5-12 lines). \
                 Slide 1: heading 'Guess the Output', body with the code in a markdown block, \
                 ending with 'What will be the output? Comment your guess below!'. \
                 Slide 2: heading 'Hint', one clear 1-2 sentence hint. \
                 Slide 3: heading 'Answer', the exact output followed by a 2-3 sentence \
                 explanation. Return valid JSON with exactly 3 slides.",
                topic
            ),
            CarouselKind::LogicPuzzle => format!(
                "Create a 2-slide Instagram carousel about the logic puzzle: {}. \
                 Slide 1: heading with the puzzle title, body explaining the puzzle in 2-3 \
                 short lines, then each rule on a separate numbered line. \
                 Slide 2: heading 'Solution & Key Takeaway', body with each reasoning step \
                 numbered on its own line and a final 'Key Point to Remember:' line. \
                 Return ONLY the JSON with exactly 2 slides.",
                topic
            ),
        }
    }
}

/// Body of a single slide.
///
/// Models occasionally return a keyed object instead of plain text for the
/// body; instead of guessing at call sites, the variant is made explicit
/// and normalized once via [`SlideBody::as_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlideBody {
    PlainText(String),
    Structured(BTreeMap<String, String>),
}

impl SlideBody {
    /// Flatten to renderable text. Structured bodies become
    /// `**key:**\nvalue` sections separated by blank lines.
    pub fn as_text(&self) -> String {
        match self {
            SlideBody::PlainText(s) => s.clone(),
            SlideBody::Structured(map) => map
                .iter()
                .map(|(k, v)| format!("**{}:**\n{}", k, v))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SlideBody::PlainText(s) => s.trim().is_empty(),
            SlideBody::Structured(map) => map.is_empty(),
        }
    }
}

/// A single carousel slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub heading: String,
    pub body: SlideBody,
}

/// Request for slide generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub topic_name: String,
    pub kind: CarouselKind,
}

impl GenerationRequest {
    pub fn new(topic_name: impl Into<String>, kind: CarouselKind) -> Self {
        Self {
            topic_name: topic_name.into(),
            kind,
        }
    }
}
