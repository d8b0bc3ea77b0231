use crate::plan::Step;

pub fn step_lines(step: &Step) -> Vec<String> {
    let mut lines = vec![format!(
        "-{}  {} {}",
        step.description, step.distance, step.zone
    )];
    for extra in [&step.cadence, &step.pace, &step.power]
        .into_iter()
        .flatten()
    {
        lines.push(extra.clone());
    }
    lines
}

/// Workout description text for already expanded steps.
pub fn render_description(steps: &[Step]) -> String {
    steps
        .iter()
        .flat_map(step_lines)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
