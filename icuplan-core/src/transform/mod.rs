//! Turns plan trainings into intervals.icu workout records.
//!
//! Rendering is split from folder binding: a [`WorkoutDraft`] holds the
//! rendered training and only becomes a [`WorkoutRecord`] once a folder id
//! exists.

mod render;
mod repeat;

use serde::Serialize;

use crate::plan::{Day, Plan, Training};
use crate::remote::FolderId;
pub use render::{render_description, step_lines};
pub use repeat::{expand_repeats, split_repeat_marker};

/// Upper-case the first letter of every word, lower-case the rest. Any
/// non-alphabetic character starts a new word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutDraft {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub day: Day,
}

impl WorkoutDraft {
    pub fn into_record(self, folder_id: FolderId) -> WorkoutRecord {
        WorkoutRecord {
            name: self.name,
            description: self.description,
            folder_id,
            kind: self.kind,
            day: self.day,
        }
    }
}

/// One workout in the shape the bulk endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutRecord {
    pub name: String,
    pub description: String,
    pub folder_id: FolderId,
    #[serde(rename = "type")]
    pub kind: String,
    pub day: Day,
}

pub fn render_training(training: &Training) -> WorkoutDraft {
    let steps = expand_repeats(&training.steps);
    WorkoutDraft {
        name: training.name.clone(),
        description: render_description(&steps),
        kind: title_case(&training.kind),
        day: training.day.clone(),
    }
}

pub fn to_record(training: &Training, folder_id: &FolderId) -> WorkoutRecord {
    render_training(training).into_record(folder_id.clone())
}

pub fn render_plan(plan: &Plan) -> Vec<WorkoutDraft> {
    plan.trainings.iter().map(render_training).collect()
}
