use chrono::NaiveDate;
use clap::Subcommand;
use colored::Colorize;
use roster_lib::{
    EditContext, MemberId, Repository, Result,
    locale::format_birth_date,
    notice::Notice,
    ranker::Proximity,
    repository::{Listing, Ranked, Saved},
    sanitize::unescape_html,
};

use crate::{confirm::confirm, notice::show};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List members, soonest birthday first
    List,
    /// Register a new member
    Add {
        name: String,
        /// Day of the month (1-31)
        day: String,
        /// Month (1-12)
        month: String,
    },
    /// Change a member's name and birthday
    Edit {
        id: String,
        name: String,
        day: String,
        month: String,
    },
    /// Delete a member
    Remove {
        id: String,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn handle(repo: &Repository, cmd: &Command, today: NaiveDate) -> Result<()> {
    match cmd {
        Command::List => list(repo, today),
        Command::Add { name, day, month } => {
            let Saved { member, replaced } = repo.submit(&EditContext::None, name, day, month)?;
            if replaced.is_some() {
                show(&Notice::replaced());
            }
            show(&Notice::added(&member));
        }
        Command::Edit {
            id,
            name,
            day,
            month,
        } => {
            let ctx = EditContext::Editing(MemberId::from(id.as_str()));
            let Saved { member, .. } = repo.submit(&ctx, name, day, month)?;
            show(&Notice::updated(&member));
        }
        Command::Remove { id, yes } => {
            let removed = repo.delete(&MemberId::from(id.as_str()), |member| {
                *yes || confirm(&format!(
                    "Are you sure you want to delete {}?",
                    member.name()
                ))
            })?;

            if let Some(member) = removed {
                show(&Notice::deleted(&member));
            }
        }
    }

    Ok(())
}

fn list(repo: &Repository, today: NaiveDate) {
    let Listing { entries, warning } = repo.listing(today);

    if let Some(warning) = &warning {
        show(&Notice::from(warning));
    }

    if entries.is_empty() {
        println!("No members registered");
        return;
    }

    let locale = repo.cfg().read().locale;

    for Ranked {
        member, proximity, ..
    } in &entries
    {
        let birth_date = format_birth_date(member.day(), member.month(), locale);
        let row = format!(
            "{:<36}  {:<40}  {:<14}",
            member.id().as_str(),
            unescape_html(member.name()),
            birth_date
        );

        match proximity {
            Proximity::Today => println!("{}  {}", row.as_str().green().bold(), "Today!".green()),
            Proximity::Soon(days) => {
                println!("{}  {}", row.as_str().yellow(), format!("{days} days").as_str().yellow())
            }
            Proximity::Later(_) => println!("{row}"),
        }
    }

    if let Some(notice) = Notice::todays_birthdays(&repo.todays_birthdays(today)) {
        show(&notice);
    }
}
