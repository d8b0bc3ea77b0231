use crate::plan::Step;

/// Returns the repeat count and the description without its `Nx` suffix.
pub fn split_repeat_marker(description: &str) -> Option<(u32, &str)> {
    let mut tail = description.char_indices().rev();
    let (_, last) = tail.next()?;
    let (digit_at, digit) = tail.next()?;
    if last != 'x' {
        return None;
    }
    let count = digit.to_digit(10)?;
    Some((count, &description[..digit_at]))
}

/// Replace every step carrying a repeat marker by that many copies of
/// itself, marker stripped. Each copy is an independent clone.
pub fn expand_repeats(steps: &[Step]) -> Vec<Step> {
    let mut expanded = Vec::with_capacity(steps.len());
    for step in steps {
        match split_repeat_marker(&step.description) {
            Some((count, base)) => {
                for _ in 0..count {
                    let mut copy = step.clone();
                    copy.description = base.to_string();
                    expanded.push(copy);
                }
            }
            None => expanded.push(step.clone()),
        }
    }
    expanded
}
