// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    EI,
    SN,
    TF,
    JP,
}

impl Axis {
    pub const ALL: [Self; 4] = [Self::EI, Self::SN, Self::TF, Self::JP];

    pub const fn label(self) -> &'static str {
        match self {
            Self::EI => "E/I",
            Self::SN => "S/N",
            Self::TF => "T/F",
            Self::JP => "J/P",
        }
    }

    /// Letter for a raw axis score; ties go to the first pole.
    pub const fn letter(self, raw: i32) -> char {
        let first = raw >= 0;
        match self {
            Self::EI => if first { 'E' } else { 'I' },
            Self::SN => if first { 'S' } else { 'N' },
            Self::TF => if first { 'T' } else { 'F' },
            Self::JP => if first { 'J' } else { 'P' },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Answer {
    StronglyAgree,
    Agree,
    #[default]
    Neutral,
    Disagree,
    StronglyDisagree,
}

impl Answer {
    pub const ALL: [Self; 5] = [
        Self::StronglyAgree,
        Self::Agree,
        Self::Neutral,
        Self::Disagree,
        Self::StronglyDisagree,
    ];

    pub const fn weight(self) -> i32 {
        match self {
            Self::StronglyAgree => 2,
            Self::Agree => 1,
            Self::Neutral => 0,
            Self::Disagree => -1,
            Self::StronglyDisagree => -2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub axis: Axis,
    pub prompt: &'static str,
    /// Agreement pushes toward the second pole.
    pub reversed: bool,
}

pub const QUESTIONS: [Question; 12] = [
    q(Axis::EI, "Studying with others gives me energy.", false),
    q(Axis::EI, "I look forward to presentations and debates.", false),
    q(Axis::EI, "I focus better and feel more at ease studying alone.", true),
    q(Axis::SN, "Examples and cases help me before the concept does.", false),
    q(Axis::SN, "I like learning step-by-step procedures in order.", false),
    q(Axis::SN, "I enjoy stretching ideas and imagining possibilities.", true),
    q(Axis::TF, "I prefer problems with a clear answer and evidence.", false),
    q(Axis::TF, "People's feelings and relationships matter to me.", true),
    q(Axis::TF, "I put data and logic first when deciding.", false),
    q(Axis::JP, "I keep a planner and stick to the schedule.", false),
    q(Axis::JP, "I often work best right before a deadline.", true),
    q(Axis::JP, "I adapt easily when plans change.", true),
];

const fn q(axis: Axis, prompt: &'static str, reversed: bool) -> Question {
    Question {
        axis,
        prompt,
        reversed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub code: String,
    pub raw: BTreeMap<Axis, i32>,
}

impl QuizScore {
    pub fn raw_for(&self, axis: Axis) -> i32 {
        self.raw.get(&axis).copied().unwrap_or(0)
    }

    pub fn summary(&self) -> String {
        let axes = Axis::ALL
            .iter()
            .map(|axis| format!("{} {:+}", axis.label(), self.raw_for(*axis)))
            .collect::<Vec<_>>()
            .join(" · ");
        format!("{} · {axes}", self.code)
    }
}

/// Scores answers indexed like `QUESTIONS`. Missing answers count as neutral.
pub fn score(answers: &BTreeMap<usize, Answer>) -> QuizScore {
    let mut raw: BTreeMap<Axis, i32> = Axis::ALL.iter().map(|axis| (*axis, 0)).collect();
    for (index, question) in QUESTIONS.iter().enumerate() {
        let weight = answers.get(&index).copied().unwrap_or_default().weight();
        let signed = if question.reversed { -weight } else { weight };
        *raw.entry(question.axis).or_insert(0) += signed;
    }
    let code = Axis::ALL
        .iter()
        .map(|axis| axis.letter(raw.get(axis).copied().unwrap_or(0)))
        .collect();
    QuizScore { code, raw }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub label: &'static str,
    pub tips: [&'static str; 3],
}

pub fn profile(code: &str) -> Profile {
    match code {
        "ISTJ" => Profile {
            label: "systematic doer",
            tips: [
                "work through a unit checklist",
                "example, then variation, then written answer",
                "log the cause of each wrong answer",
            ],
        },
        "ENFP" => Profile {
            label: "idea jumper",
            tips: [
                "connect topics to a project",
                "cap the to-do list at three items",
                "start with the five-minute rule",
            ],
        },
        _ => Profile {
            label: "custom profile",
            tips: [
                "summarize the core concepts",
                "log the cause of each wrong answer",
                "check in on your own learning once a week",
            ],
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub score: QuizScore,
    pub at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizState {
    answers: BTreeMap<usize, Answer>,
    result: Option<QuizResult>,
}

impl QuizState {
    /// Records an answer. Indices outside the question bank are ignored.
    pub fn answer(&mut self, index: usize, answer: Answer) -> bool {
        if index >= QUESTIONS.len() {
            return false;
        }
        self.answers.insert(index, answer);
        true
    }

    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), QUESTIONS.len())
    }

    pub fn compute(&mut self, now: OffsetDateTime) -> &QuizResult {
        let score = score(&self.answers);
        tracing::debug!(code = %score.code, "quiz scored");
        self.result.insert(QuizResult { score, at: now })
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn reset(&mut self) {
        self.answers.clear();
        self.result = None;
    }
}
