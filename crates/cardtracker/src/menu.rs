//! Interactive numbered menu.
//!
//! The menu owns no records: it borrows a [`RecordStore`] and reads
//! commands from any [`BufRead`], so it can be driven by a terminal or by a
//! test. An action that fails is reported and the menu keeps running.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::{error, warn};

use crate::error::{ListKind, Result};
use crate::render;
use crate::rules::{FiveTwentyFourRule, Summary};
use crate::storage::RecordStore;
use crate::validation::{self, ValidCard, ValidWish};

/// How the menu ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// The user chose save-and-exit and the save succeeded.
    Saved,
    /// The user quit without saving.
    Discarded,
    /// Input ended before the user chose to exit; nothing was saved.
    InputClosed,
}

/// What to do after an action.
enum Step {
    Continue,
    Exit(MenuExit),
}

/// One interactive session over a store.
#[derive(Debug)]
pub struct Menu<'a, R, W> {
    store: &'a mut RecordStore,
    rule: FiveTwentyFourRule,
    today: NaiveDate,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a session. `today` is the date the status figures use.
    pub fn new(
        store: &'a mut RecordStore,
        rule: FiveTwentyFourRule,
        today: NaiveDate,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            rule,
            today,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    /// Failures of individual actions, including a failed save, are reported
    /// to the user and the menu continues.
    pub fn run(mut self) -> Result<MenuExit> {
        writeln!(self.output, "\n{}", "=".repeat(70))?;
        writeln!(self.output, "💳 Credit Card Welcome Bonus Tracker")?;
        writeln!(self.output, "{}", "=".repeat(70))?;

        loop {
            self.show_options()?;
            let Some(choice) = self.prompt("\nEnter your choice (1-8): ")? else {
                return self.input_closed();
            };

            let outcome = match choice.as_str() {
                "1" => self.list_cards(),
                "2" => self.add_card(),
                "3" => self.save_and_exit(),
                "4" => self.delete_card(),
                "5" => self.list_wishlist(),
                "6" => self.add_wishlist(),
                "7" => self.show_status(),
                "8" => self.quit(),
                other => {
                    writeln!(
                        self.output,
                        "❌ Invalid choice '{other}'. Please enter a number from 1 to 8."
                    )?;
                    Ok(Step::Continue)
                }
            };

            match outcome {
                Ok(Step::Continue) => {}
                Ok(Step::Exit(MenuExit::InputClosed)) => return self.input_closed(),
                Ok(Step::Exit(exit)) => return Ok(exit),
                Err(e) => {
                    error!("Menu action failed: {}", e);
                    writeln!(self.output, "❌ Error: {e}")?;
                }
            }
        }
    }

    fn show_options(&mut self) -> Result<()> {
        let dirty = if self.store.is_dirty() {
            " (unsaved changes)"
        } else {
            ""
        };
        writeln!(self.output, "\nOptions{dirty}:")?;
        writeln!(self.output, "1) List cards")?;
        writeln!(self.output, "2) Add new card")?;
        writeln!(self.output, "3) Save and exit")?;
        writeln!(self.output, "4) Delete card")?;
        writeln!(self.output, "5) Show wishlist")?;
        writeln!(self.output, "6) Add wishlist card")?;
        writeln!(self.output, "7) Show status")?;
        writeln!(self.output, "8) Quit without saving")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until `check` accepts the answer; `None` at end of input.
    fn prompt_until<T>(
        &mut self,
        label: &str,
        check: impl Fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            match check(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) if e.is_input_error() => writeln!(self.output, "❌ {e}")?,
                Err(e) => return Err(e),
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        let answer = self.prompt(&format!("{question} [y/N]: "))?;
        Ok(answer.map(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")))
    }

    fn input_closed(&mut self) -> Result<MenuExit> {
        if self.store.is_dirty() {
            warn!("Input closed with unsaved changes; they were not saved");
        }
        writeln!(self.output, "\n⚠️  Input closed. Changes were not saved.")?;
        Ok(MenuExit::InputClosed)
    }

    fn list_cards(&mut self) -> Result<Step> {
        render::card_table(&mut self.output, &self.store.document().current)?;
        Ok(Step::Continue)
    }

    fn list_wishlist(&mut self) -> Result<Step> {
        render::wishlist_table(&mut self.output, &self.store.document().wishlist)?;
        Ok(Step::Continue)
    }

    fn show_status(&mut self) -> Result<Step> {
        let summary = Summary::compute(self.store.document(), &self.rule, self.today);
        render::summary(&mut self.output, &summary)?;
        Ok(Step::Continue)
    }

    fn add_card(&mut self) -> Result<Step> {
        writeln!(self.output, "\n--- Add New Card ---")?;

        let Some(card_name) = self.prompt_until(
            "Card name (e.g., Chase Sapphire Preferred): ",
            validation::validate_name,
        )?
        else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };
        let Some(issuer) = self.prompt("Issuer (blank for Unknown): ")? else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };
        let Some(welcome_points) = self.prompt_until(
            "Welcome offer points (must be a positive number): ",
            validation::validate_card_points,
        )?
        else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };
        let Some(opened_date) = self.prompt_until(
            "Date opened (YYYY-MM-DD, e.g., 2025-11-28): ",
            validation::validate_opened_date,
        )?
        else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };
        let Some(benefits) = self.prompt("Benefits (optional): ")? else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };

        let card = ValidCard {
            card_name,
            welcome_points,
            opened_date,
        }
        .into_record(&issuer, &benefits);
        writeln!(self.output, "✅ Card added: {}", card.card_name)?;
        self.store.add_card(card);
        Ok(Step::Continue)
    }

    fn add_wishlist(&mut self) -> Result<Step> {
        writeln!(self.output, "\n--- Add Wishlist Card ---")?;

        let Some(card_name) = self.prompt_until("Card name: ", validation::validate_name)? else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };
        let Some(issuer) = self.prompt("Issuer (blank for Unknown): ")? else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };
        let Some(target_points) = self.prompt_until(
            "Target points (blank for 0): ",
            validation::validate_target_points,
        )?
        else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };
        let Some(notes) = self.prompt("Notes (optional): ")? else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };

        let entry = ValidWish {
            card_name,
            target_points,
        }
        .into_record(&issuer, &notes);
        writeln!(self.output, "✅ Added to wishlist: {}", entry.card_name)?;
        self.store.add_wishlist(entry);
        Ok(Step::Continue)
    }

    fn delete_card(&mut self) -> Result<Step> {
        if self.store.document().current.is_empty() {
            writeln!(self.output, "\n📋 No cards to delete.")?;
            return Ok(Step::Continue);
        }
        render::card_table(&mut self.output, &self.store.document().current)?;

        let Some(answer) = self.prompt("Row to delete (blank to cancel): ")? else {
            return Ok(Step::Exit(MenuExit::InputClosed));
        };
        if answer.is_empty() {
            return Ok(Step::Continue);
        }
        let Ok(row) = answer.parse::<usize>() else {
            writeln!(self.output, "❌ '{answer}' is not a row number.")?;
            return Ok(Step::Continue);
        };

        let index = self.store.document().row_index(ListKind::Current, row)?;
        let name = self.store.document().card(index)?.card_name.clone();
        match self.confirm(&format!("Delete '{name}'?"))? {
            None => Ok(Step::Exit(MenuExit::InputClosed)),
            Some(false) => {
                writeln!(self.output, "Kept '{name}'.")?;
                Ok(Step::Continue)
            }
            Some(true) => {
                let removed = self.store.remove_card(index)?;
                writeln!(self.output, "✅ Card '{}' deleted.", removed.card_name)?;
                Ok(Step::Continue)
            }
        }
    }

    fn save_and_exit(&mut self) -> Result<Step> {
        self.store.save()?;
        writeln!(self.output, "✅ Data saved to {}", self.store.path().display())?;
        writeln!(self.output, "Goodbye!\n")?;
        Ok(Step::Exit(MenuExit::Saved))
    }

    fn quit(&mut self) -> Result<Step> {
        if self.store.is_dirty() {
            match self.confirm("Discard unsaved changes?")? {
                None => return Ok(Step::Exit(MenuExit::InputClosed)),
                Some(false) => return Ok(Step::Continue),
                Some(true) => {}
            }
        }
        writeln!(self.output, "Goodbye!\n")?;
        Ok(Step::Exit(MenuExit::Discarded))
    }
}
