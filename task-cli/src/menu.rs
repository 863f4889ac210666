//! Text menu that drives the [`TaskService`] through a [`Console`].

use crate::config::Settings;
use crate::console::Console;
use crate::input;
use chrono::NaiveDateTime;
use thiserror::Error;
use todo_list::{Listing, Outcome, Task, TaskId, TaskService, ValidationError};
use tracing::{debug, warn};

pub const MENU: [&str; 12] = [
    "To-Do List Application",
    "======================",
    "1. Add New To-Do Item",
    "2. Display The To-Do List",
    "3. Update One To-Do Item",
    "4. Delete One To-Do Item",
    "5. Mark One To-Do Item as Completed",
    "6. Sort To-Do Items By Due Date",
    "7. Sort To-Do Items By Title",
    "8. Filter To-Do Items By Completed",
    "9. Filter To-Do Items By Not Completed",
    "10. Exit The To-Do Application",
];

pub const NO_ITEMS: &str = "No to-do items were found.";
pub const INVALID_SELECTION: &str = "Please enter a valid number between 1 and 10.";
pub const INVALID_DATE: &str = "Invalid date format. Please enter the date in YYYY-MM-DD format.";
pub const INVALID_ID: &str = "Invalid To-Do Item ID, it should be in GUID format.";
pub const EMPTY_TITLE: &str = "The To-Do Item title cannot be empty. Please try again.";
pub const EMPTY_DESCRIPTION: &str =
    "The To-Do Item description cannot be empty. Please try again.";
pub const PRESS_ENTER: &str = "Press Enter to continue...";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input was closed")]
    InputClosed,
    #[error("Console I/O failed")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Add,
    Display,
    Update,
    Delete,
    MarkCompleted,
    SortByDueDate,
    SortByTitle,
    FilterCompleted,
    FilterNotCompleted,
    Exit,
}

impl TryFrom<u8> for MenuOption {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => MenuOption::Add,
            2 => MenuOption::Display,
            3 => MenuOption::Update,
            4 => MenuOption::Delete,
            5 => MenuOption::MarkCompleted,
            6 => MenuOption::SortByDueDate,
            7 => MenuOption::SortByTitle,
            8 => MenuOption::FilterCompleted,
            9 => MenuOption::FilterNotCompleted,
            10 => MenuOption::Exit,
            other => return Err(other),
        })
    }
}

/// The interactive application: one console, one service, for a whole run.
pub struct App<C: Console> {
    console: C,
    service: TaskService,
    settings: Settings,
}

impl<C: Console> App<C> {
    pub fn new(console: C, service: TaskService, settings: Settings) -> Self {
        Self {
            console,
            service,
            settings,
        }
    }

    pub fn service(&self) -> &TaskService {
        &self.service
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Shows the menu and handles selections until Exit or end of input.
    ///
    /// Unexpected errors from a single action are reported and the loop goes
    /// on; only console I/O failures end the run with an error.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            self.print_menu()?;
            self.console.write("Enter a selection: ")?;
            let selection = match self.console.read_line()? {
                Some(line) => input::parse_selection(&line),
                None => return Ok(()),
            };
            let Some(option) = selection else {
                self.console.write_line(INVALID_SELECTION)?;
                continue;
            };
            if option == MenuOption::Exit {
                debug!("exit selected");
                return Ok(());
            }

            match self.perform(option) {
                Ok(()) => {}
                Err(Error::InputClosed) => return Ok(()),
                // Prompts already reject blank fields; this only guards the service contract.
                Err(Error::Validation(err)) => {
                    warn!(%err, "action failed");
                    self.console
                        .write_line(&format!("An unexpected error has occurred: {err}"))?;
                }
                Err(err @ Error::Io(_)) => return Err(err),
            }
        }
    }

    pub fn perform(&mut self, option: MenuOption) -> Result<(), Error> {
        debug!(?option, "performing menu action");
        match option {
            MenuOption::Add => self.add(),
            MenuOption::Display => {
                self.display_all()?;
                self.pause()
            }
            MenuOption::Update => self.update(),
            MenuOption::Delete => self.delete(),
            MenuOption::MarkCompleted => self.mark_completed(),
            MenuOption::SortByDueDate => {
                self.console
                    .write_line("The To-Do Items have been sorted by due date:")?;
                let sorted = self.service.sort_by_due_date();
                print_full(&mut self.console, &self.settings, &sorted)?;
                self.pause()
            }
            MenuOption::SortByTitle => {
                self.console
                    .write_line("The To-Do Items have been sorted by title:")?;
                let sorted = self.service.sort_by_title();
                print_full(&mut self.console, &self.settings, &sorted)?;
                self.pause()
            }
            MenuOption::FilterCompleted => {
                self.console
                    .write_line("The To-Do items have been filtered by completed:")?;
                let filtered = self.service.filter_completed();
                print_filtered(&mut self.console, &self.settings, &filtered)?;
                self.pause()
            }
            MenuOption::FilterNotCompleted => {
                self.console
                    .write_line("The To-Do items have been filtered by not completed:")?;
                let filtered = self.service.filter_not_completed();
                print_filtered(&mut self.console, &self.settings, &filtered)?;
                self.pause()
            }
            MenuOption::Exit => Ok(()),
        }
    }

    fn add(&mut self) -> Result<(), Error> {
        let title = self.prompt_text("Enter The To-Do Item Title: ", EMPTY_TITLE)?;
        let description =
            self.prompt_text("Enter The To-Do Item Description: ", EMPTY_DESCRIPTION)?;
        let due_date = self.prompt_date("Enter The To-Do Item Due Date (YYYY-MM-DD): ")?;

        self.service.add(title, description, due_date)?;
        self.console
            .write_line("The To-Do Item has been added successfully!")?;
        Ok(())
    }

    fn update(&mut self) -> Result<(), Error> {
        let id = self.prompt_id("Enter To-Do Item ID to be updated: ")?;
        let title = self.prompt_text("Enter The New To-Do Item Title: ", EMPTY_TITLE)?;
        let description =
            self.prompt_text("Enter The New To-Do Item Description: ", EMPTY_DESCRIPTION)?;
        let due_date = self.prompt_date("Enter The New To-Do Item Due Date (YYYY-MM-DD): ")?;

        let message = match self.service.update(id, title, description, due_date)? {
            Outcome::Done => "The To-Do Item has been updated successfully!",
            Outcome::NotFound => "The To-Do Item was not found.",
        };
        self.console.write_line(message)?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), Error> {
        let id = self.prompt_id("Enter The To-Do Item ID to be deleted: ")?;
        let message = match self.service.delete(id) {
            Outcome::Done => "The To-Do item has been deleted successfully!",
            Outcome::NotFound => "The To-Do item was not found.",
        };
        self.console.write_line(message)?;
        Ok(())
    }

    fn mark_completed(&mut self) -> Result<(), Error> {
        let id = self.prompt_id("Enter The To-Do Item ID to be marked as completed: ")?;
        let message = match self.service.mark_completed(id) {
            Outcome::Done => "The To-Do item has been marked as completed!",
            Outcome::NotFound => "The To-Do item was not found.",
        };
        self.console.write_line(message)?;
        Ok(())
    }

    fn display_all(&mut self) -> Result<(), Error> {
        match self.service.list_all() {
            Listing::Empty => self.console.write_line(NO_ITEMS)?,
            Listing::Tasks(tasks) => {
                for task in tasks {
                    let line = full_line(task, &self.settings.date_format);
                    self.console.write_line(&line)?;
                }
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<(), Error> {
        self.console.write_line("")?;
        for line in MENU {
            self.console.write_line(line)?;
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), Error> {
        if self.settings.pause_after_listing {
            self.console.write_line(PRESS_ENTER)?;
            self.read()?;
        }
        Ok(())
    }

    fn read(&mut self) -> Result<String, Error> {
        self.console.read_line()?.ok_or(Error::InputClosed)
    }

    fn prompt_text(&mut self, prompt: &str, complaint: &str) -> Result<String, Error> {
        loop {
            self.console.write(prompt)?;
            let text = self.read()?;
            if !input::is_blank(&text) {
                return Ok(text);
            }
            self.console.write_line(complaint)?;
        }
    }

    fn prompt_date(&mut self, prompt: &str) -> Result<NaiveDateTime, Error> {
        loop {
            self.console.write(prompt)?;
            if let Some(date) = input::parse_due_date(&self.read()?) {
                return Ok(date);
            }
            self.console.write_line(INVALID_DATE)?;
        }
    }

    fn prompt_id(&mut self, prompt: &str) -> Result<TaskId, Error> {
        loop {
            self.console.write(prompt)?;
            if let Some(id) = input::parse_task_id(&self.read()?) {
                return Ok(id);
            }
            self.console.write_line(INVALID_ID)?;
        }
    }
}

fn print_full<C: Console>(
    console: &mut C,
    settings: &Settings,
    tasks: &[&Task],
) -> Result<(), Error> {
    if tasks.is_empty() {
        console.write_line(NO_ITEMS)?;
    }
    for task in tasks {
        console.write_line(&full_line(task, &settings.date_format))?;
    }
    Ok(())
}

fn print_filtered<C: Console>(
    console: &mut C,
    settings: &Settings,
    tasks: &[&Task],
) -> Result<(), Error> {
    for task in tasks {
        console.write_line(&filtered_line(task, &settings.date_format))?;
    }
    Ok(())
}

pub fn full_line(task: &Task, date_format: &str) -> String {
    format!(
        "ID: {}, Title: {}, Description: {}, Due Date: {}, Completed: {}",
        task.id(),
        task.title(),
        task.description(),
        task.due_date().format(date_format),
        task.is_completed()
    )
}

pub fn filtered_line(task: &Task, date_format: &str) -> String {
    format!(
        "ID: {}, Title: {}, Due Date: {}, Completed: {}",
        task.id(),
        task.title(),
        task.due_date().format(date_format),
        task.is_completed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{MockConsole, ScriptedConsole};
    use mockall::predicate::*;

    fn settings() -> Settings {
        Settings {
            pause_after_listing: false,
            ..Settings::default()
        }
    }

    fn run_script(lines: &[&str]) -> App<ScriptedConsole> {
        let mut app = App::new(
            ScriptedConsole::new(lines.iter().copied()),
            TaskService::new(),
            settings(),
        );
        app.run().unwrap();
        app
    }

    /// Lines written after `heading`, up to the next menu.
    fn after<'a>(console: &'a ScriptedConsole, heading: &str) -> Vec<&'a str> {
        let output = console.output();
        let start = output
            .iter()
            .position(|line| line == heading)
            .expect("heading not printed")
            + 1;
        output[start..]
            .iter()
            .take_while(|line| !line.is_empty())
            .map(String::as_str)
            .collect()
    }

    fn task_lines(console: &ScriptedConsole) -> Vec<&str> {
        console
            .output()
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with("ID: "))
            .collect()
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_exit_stops_the_loop() {
            let app = run_script(&["10", "1"]);

            assert_eq!(app.console().remaining_input(), 1);
            assert!(app.console().printed(MENU[0]));
        }

        #[test]
        fn test_end_of_input_stops_the_loop() {
            let app = run_script(&[]);

            assert!(app.console().printed("Enter a selection: "));
        }

        #[test]
        fn test_invalid_selection_is_reported_and_menu_repeats() {
            let app = run_script(&["abc", "0", "11", "10"]);

            assert_eq!(app.console().count(INVALID_SELECTION), 3);
            assert_eq!(app.console().count(MENU[0]), 4);
        }
    }

    mod add_tests {
        use super::*;

        #[test]
        fn test_add_stores_task_and_reports_success() {
            let app = run_script(&["1", "Buy milk", "Two litres", "2024-03-01", "10"]);

            assert_eq!(app.service().len(), 1);
            assert!(app
                .console()
                .printed("The To-Do Item has been added successfully!"));
        }

        #[test]
        fn test_add_reprompts_for_blank_fields_and_bad_dates() {
            let app = run_script(&[
                "1", "", "   ", "Title", "", "Description", "tomorrow", "2024-1-1x", "2024-01-01",
                "10",
            ]);

            assert_eq!(app.console().count(EMPTY_TITLE), 2);
            assert_eq!(app.console().count(EMPTY_DESCRIPTION), 1);
            assert_eq!(app.console().count(INVALID_DATE), 2);
            assert_eq!(app.service().len(), 1);
        }

        #[test]
        fn test_input_closed_mid_action_ends_run_without_mutation() {
            let app = run_script(&["1", "Title"]);

            assert!(app.service().is_empty());
        }
    }

    mod id_prompt_tests {
        use super::*;

        #[test]
        fn test_update_reprompts_on_malformed_id() {
            let app = run_script(&[
                "3",
                "nope",
                "00000000-0000-0000-0000-000000000001",
                "T",
                "D",
                "2024-01-01",
                "10",
            ]);

            assert_eq!(app.console().count(INVALID_ID), 1);
            assert!(app.console().printed("The To-Do Item was not found."));
        }

        #[test]
        fn test_delete_reprompts_on_malformed_id_instead_of_exiting() {
            let app = run_script(&["4", "bad", "00000000-0000-0000-0000-000000000001", "10"]);

            assert_eq!(app.console().count(INVALID_ID), 1);
            assert!(app.console().printed("The To-Do item was not found."));
            assert_eq!(app.console().remaining_input(), 0);
        }

        #[test]
        fn test_mark_completed_reprompts_on_malformed_id_instead_of_exiting() {
            let app = run_script(&["5", "", "bad", "00000000-0000-0000-0000-000000000001", "10"]);

            assert_eq!(app.console().count(INVALID_ID), 2);
            assert!(app.console().printed("The To-Do item was not found."));
        }
    }

    mod mutation_tests {
        use super::*;

        #[test]
        fn test_full_lifecycle_in_one_run() {
            let mut service = TaskService::new();
            let due = input::parse_due_date("2024-01-01").unwrap();
            let id = service.add("Old", "Old desc", due).unwrap().to_string();
            let id = id.as_str();

            let console = ScriptedConsole::new([
                "3", id, "New", "New desc", "2024-02-02", "5", id, "5", id, "2", "4", id, "2",
                "10",
            ]);
            let mut app = App::new(console, service, settings());
            app.run().unwrap();

            let console = app.console();
            assert!(console.printed("The To-Do Item has been updated successfully!"));
            assert_eq!(
                console.count("The To-Do item has been marked as completed!"),
                2
            );
            assert!(console.printed(&format!(
                "ID: {id}, Title: New, Description: New desc, Due Date: 2024-02-02, Completed: true"
            )));
            assert!(console.printed("The To-Do item has been deleted successfully!"));
            assert!(console.printed(NO_ITEMS));
            assert!(app.service().is_empty());
        }
    }

    mod listing_tests {
        use super::*;

        fn seeded_app(lines: &[&str]) -> App<ScriptedConsole> {
            let mut service = TaskService::new();
            service
                .add(
                    "Attend meeting",
                    "Team sync",
                    input::parse_due_date("2024-01-02").unwrap(),
                )
                .unwrap();
            let groceries = service
                .add(
                    "Buy groceries",
                    "Milk",
                    input::parse_due_date("2024-01-01").unwrap(),
                )
                .unwrap();
            let _ = service.mark_completed(groceries);
            let mut app = App::new(
                ScriptedConsole::new(lines.iter().copied()),
                service,
                settings(),
            );
            app.run().unwrap();
            app
        }

        fn titles(lines: &[&str]) -> Vec<String> {
            lines
                .iter()
                .map(|line| {
                    let start = line.find("Title: ").unwrap() + "Title: ".len();
                    let end = line[start..].find(',').unwrap() + start;
                    line[start..end].to_string()
                })
                .collect()
        }

        #[test]
        fn test_empty_store_reports_no_items() {
            let app = run_script(&["2", "10"]);

            assert!(app.console().printed(NO_ITEMS));
        }

        #[test]
        fn test_display_lists_in_insertion_order() {
            let app = seeded_app(&["2", "10"]);

            let lines = task_lines(app.console());
            assert_eq!(titles(&lines), vec!["Attend meeting", "Buy groceries"]);
        }

        #[test]
        fn test_sort_by_due_date_prints_sorted_order() {
            let app = seeded_app(&["6", "10"]);

            let lines = after(app.console(), "The To-Do Items have been sorted by due date:");
            assert_eq!(titles(&lines), vec!["Buy groceries", "Attend meeting"]);
        }

        #[test]
        fn test_sort_by_title_prints_sorted_order() {
            let app = seeded_app(&["7", "10"]);

            let lines = after(app.console(), "The To-Do Items have been sorted by title:");
            assert_eq!(titles(&lines), vec!["Attend meeting", "Buy groceries"]);
        }

        #[test]
        fn test_sorting_leaves_display_order_untouched() {
            let app = seeded_app(&["6", "2", "10"]);

            let lines = task_lines(app.console());
            assert_eq!(lines.len(), 4);
            assert_eq!(titles(&lines[..2]), vec!["Buy groceries", "Attend meeting"]);
            assert_eq!(titles(&lines[2..]), vec!["Attend meeting", "Buy groceries"]);
        }

        #[test]
        fn test_filters_split_by_completion_without_description() {
            let app = seeded_app(&["8", "9", "10"]);
            let console = app.console();

            let completed = after(console, "The To-Do items have been filtered by completed:");
            let open = after(console, "The To-Do items have been filtered by not completed:");
            assert_eq!(titles(&completed), vec!["Buy groceries"]);
            assert_eq!(titles(&open), vec!["Attend meeting"]);
            assert!(completed[0].ends_with("Due Date: 2024-01-01, Completed: true"));
            assert!(!completed[0].contains("Description"));
        }

        #[test]
        fn test_pause_waits_for_enter_when_enabled() {
            let mut app = App::new(
                ScriptedConsole::new(["2", "", "10"]),
                TaskService::new(),
                Settings::default(),
            );
            app.run().unwrap();

            assert!(app.console().printed(PRESS_ENTER));
            assert_eq!(app.console().count(MENU[0]), 2);
        }
    }

    #[test]
    fn test_date_format_setting_is_used_for_rendering() {
        let mut service = TaskService::new();
        service
            .add("T", "D", input::parse_due_date("2024-01-31").unwrap())
            .unwrap();
        let settings = Settings {
            date_format: "%d/%m/%Y".to_string(),
            ..settings()
        };
        let mut app = App::new(ScriptedConsole::new(["2", "10"]), service, settings);
        app.run().unwrap();

        assert!(app
            .console()
            .output()
            .iter()
            .any(|line| line.contains("Due Date: 31/01/2024")));
    }

    #[test]
    fn test_console_write_failure_aborts_run() {
        let mut console = MockConsole::new();
        console.expect_write_line().returning(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdout closed",
            ))
        });
        let mut app = App::new(console, TaskService::new(), settings());

        let result = app.run();

        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_closed_input_on_selection_exits_cleanly() {
        let mut console = MockConsole::new();
        console.expect_write_line().returning(|_| Ok(()));
        console
            .expect_write()
            .with(eq("Enter a selection: "))
            .times(1)
            .returning(|_| Ok(()));
        console.expect_read_line().times(1).returning(|| Ok(None));
        let mut app = App::new(console, TaskService::new(), settings());

        assert!(app.run().is_ok());
    }
}
