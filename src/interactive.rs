//! Interactive report flow
//!
//! Student picker (one page at a time with Previous/Next), chart
//! multi-select, optional remarks. Dismissing the chart step cancels the
//! report and returns to the picker.

use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use crate::views::{self, StudentPage};
use dialoguer::{Input, MultiSelect, Select};
use student_report_common::{ChartKind, Report};

/// What one picker line does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerChoice {
    Student(usize),
    Previous,
    Next,
    Quit,
}

/// Picker lines for a page: students, then navigation
pub fn picker_items(page: &StudentPage) -> Vec<(String, PickerChoice)> {
    let mut items: Vec<(String, PickerChoice)> = page
        .entries
        .iter()
        .map(|e| (format!("{:>6}  {}", e.number, e.name), PickerChoice::Student(e.index)))
        .collect();

    if page.has_previous() {
        items.push(("<< Previous".to_string(), PickerChoice::Previous));
    }
    if page.has_next() {
        items.push(("Next >>".to_string(), PickerChoice::Next));
    }
    items.push(("Quit".to_string(), PickerChoice::Quit));
    items
}

/// Run the flow until a report is ready. `None` when the user quits.
pub fn run_interactive(session: &mut Session, config: &Config) -> Result<Option<Report>> {
    let layout = &config.layout;
    let mut page = 1;

    loop {
        let view = views::students_view(session, layout, page, config.page_size)?;
        println!(
            "\n{} / {}  (page {} of {}, {} students)",
            view.number_header, view.name_header, view.page, view.total_pages, view.total_students
        );

        let items = picker_items(&view);
        let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();
        let picked = Select::new()
            .with_prompt("Select a student")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let choice = match picked {
            Some(i) => items[i].1,
            None => PickerChoice::Quit,
        };

        let index = match choice {
            PickerChoice::Previous => {
                page = view.page - 1;
                continue;
            }
            PickerChoice::Next => {
                page = view.page + 1;
                continue;
            }
            PickerChoice::Quit => return Ok(None),
            PickerChoice::Student(index) => index,
        };

        session.select_student(index)?;
        if !prompt_charts(session, config)? {
            println!("  -> cancelled\n");
            session.cancel_report();
            continue;
        }

        let remarks: String = Input::new()
            .with_prompt("Remarks (optional)")
            .allow_empty(true)
            .interact_text()?;

        let report = views::report_view(session, layout, Some(&remarks))?;
        return Ok(Some(report));
    }
}

/// Chart step. false when dismissed or nothing was checked.
fn prompt_charts(session: &mut Session, config: &Config) -> Result<bool> {
    let selection = views::chart_selection_view(session, &config.layout)?;
    println!("\nStudent {}: {}", selection.number, selection.name);

    let labels: Vec<&str> = selection.options.iter().map(|(kind, _)| kind.label()).collect();
    let checked: Vec<bool> = selection.options.iter().map(|(_, on)| *on).collect();

    let Some(chosen) = MultiSelect::new()
        .with_prompt("Charts to include (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&checked)
        .interact_opt()?
    else {
        return Ok(false);
    };

    for (i, kind) in ChartKind::ALL.iter().enumerate() {
        session.set_chart(*kind, chosen.contains(&i));
    }

    let selection = views::chart_selection_view(session, &config.layout)?;
    if !selection.can_proceed() {
        println!("  Select at least one chart.");
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::StudentEntry;

    fn page(page: usize, total_pages: usize) -> StudentPage {
        StudentPage {
            number_header: "No".into(),
            name_header: "Name".into(),
            entries: vec![
                StudentEntry { index: 10, number: "11".into(), name: "Ravi".into() },
                StudentEntry { index: 11, number: "12".into(), name: "Sita".into() },
            ],
            page,
            total_pages,
            total_students: 12,
        }
    }

    #[test]
    fn test_picker_items_middle_page() {
        let items = picker_items(&page(2, 3));
        let choices: Vec<PickerChoice> = items.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            choices,
            vec![
                PickerChoice::Student(10),
                PickerChoice::Student(11),
                PickerChoice::Previous,
                PickerChoice::Next,
                PickerChoice::Quit,
            ]
        );
        assert!(items[0].0.ends_with("Ravi"));
    }

    #[test]
    fn test_picker_items_single_page() {
        let items = picker_items(&page(1, 1));
        assert_eq!(items.len(), 3);
        assert_eq!(items.last().map(|(_, c)| *c), Some(PickerChoice::Quit));
    }
}
