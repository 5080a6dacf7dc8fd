//! Interactive collection of a day's inputs.

use std::io::{self, BufRead, Write};

use dinacharya_core::{PlanRequest, StressLevel, Task, TaskType};

/// Ends task entry when typed as a task name (case-insensitive).
const DONE: &str = "done";

const WAKE_QUESTION: &str = "Enter your wake-up time (HH:MM, 24-hour format, e.g., 07:00): ";
const SLEEP_QUESTION: &str = "Enter your sleep time (HH:MM, 24-hour format, e.g., 23:00): ";

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask_required<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    ask(input, output, question)?.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before all answers were given",
        )
    })
}

/// Prompt for wake/sleep, one work window, stress and tasks.
///
/// Answers are taken as typed; time validation happens when the day is
/// planned. End of input while entering tasks finishes the task list.
pub fn collect_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<PlanRequest> {
    let wake_time = ask_required(input, output, WAKE_QUESTION)?;
    let sleep_time = ask_required(input, output, SLEEP_QUESTION)?;
    let work_start = ask_required(input, output, "Enter your work/study start time (HH:MM): ")?;
    let work_end = ask_required(input, output, "Enter your work/study end time (HH:MM): ")?;
    let stress = ask_required(input, output, "Enter your stress level (Low/Medium/High): ")?;

    writeln!(output, "\nEnter your tasks. Type '{DONE}' when finished.")?;
    let type_question = format!("Task type ({}): ", TaskType::LABELS.join(" / "));
    let mut tasks = Vec::new();
    while let Some(name) = ask(input, output, "Task name: ")? {
        if name.eq_ignore_ascii_case(DONE) {
            break;
        }
        let task_type = ask_required(input, output, &type_question)?;
        tasks.push(Task::new(name, task_type));
    }

    Ok(PlanRequest {
        wake_time,
        sleep_time,
        work_hours: vec![(work_start, work_end)],
        stress_level: StressLevel::from(stress),
        tasks,
        date: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(script: &str) -> io::Result<(PlanRequest, String)> {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let request = collect_request(&mut input, &mut output)?;
        Ok((request, String::from_utf8(output).unwrap()))
    }

    #[test]
    fn test_collects_full_day() {
        let (request, output) = collect(
            "07:00\n23:00\n09:00\n17:00\nLow\nReport\nDeep Work\nSketch\nCreative\ndone\n",
        )
        .unwrap();

        assert_eq!(request.wake_time, "07:00");
        assert_eq!(request.sleep_time, "23:00");
        assert_eq!(request.work_hours, vec![("09:00".to_string(), "17:00".to_string())]);
        assert_eq!(request.stress_level, StressLevel::Low);
        assert_eq!(
            request.tasks,
            vec![Task::new("Report", "Deep Work"), Task::new("Sketch", "Creative")]
        );
        assert!(output.contains(WAKE_QUESTION));
        assert!(output
            .contains("Task type (Deep Work / Light Work / Creative / High-Stakes Decision): "));
    }

    #[test]
    fn test_done_is_case_insensitive() {
        let (request, _) = collect("07:00\n23:00\n09:00\n17:00\nHigh\nDONE\n").unwrap();
        assert!(request.tasks.is_empty());
    }

    #[test]
    fn test_end_of_input_finishes_task_list() {
        let (request, _) =
            collect("07:00\n23:00\n09:00\n17:00\nMedium\nEmail\nLight Work\n").unwrap();
        assert_eq!(request.tasks, vec![Task::new("Email", "Light Work")]);
    }

    #[test]
    fn test_windows_line_endings() {
        let (request, _) = collect("06:30\r\n22:00\r\n08:00\r\n12:00\r\nLow\r\ndone\r\n").unwrap();
        assert_eq!(request.wake_time, "06:30");
        assert_eq!(request.stress_level, StressLevel::Low);
    }

    #[test]
    fn test_missing_answers_are_an_error() {
        let err = collect("07:00\n23:00\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_missing_task_type_is_an_error() {
        let err = collect("07:00\n23:00\n09:00\n17:00\nLow\nReport\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
