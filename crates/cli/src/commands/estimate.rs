// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rp_core::{Database, MoveDirection};

use super::open_db;
use crate::cli::{EstimateCommand, OutputFormat};
use crate::config::Config;
use crate::display::{format_estimate, format_number};
use crate::error::Result;

pub fn run(command: EstimateCommand) -> Result<()> {
    let (mut db, config, _) = open_db()?;
    run_impl(&mut db, &config, command)
}

/// Internal implementation that accepts db/config for testing.
pub(crate) fn run_impl(db: &mut Database, config: &Config, command: EstimateCommand) -> Result<()> {
    match command {
        EstimateCommand::Create { project, rate } => {
            let estimate = db.create_estimate(project, rate.unwrap_or(config.default_rate))?;
            println!(
                "Estimate for project {} at ${}/h",
                estimate.project_id,
                format_number(estimate.blended_rate)
            );
        }
        EstimateCommand::Show { project, output } => {
            let estimate = db.get_estimate(project)?;
            match output.output {
                OutputFormat::Text => {
                    let name = db.get_project(project)?.name;
                    println!("{}", format_estimate(&estimate, &name));
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&estimate)?),
            }
        }
        EstimateCommand::Rate { project, rate } => {
            db.set_blended_rate(project, rate)?;
            println!("Set blended rate of project {} to ${}/h", project, format_number(rate));
        }
        EstimateCommand::Story { project, name } => {
            let story = db.add_story(project, &name)?;
            println!(
                "Added story [{}] {} ({}h)",
                story.id,
                story.name,
                format_number(story.hours())
            );
        }
        EstimateCommand::Item {
            story,
            discipline,
            hours,
        } => {
            let item = db.upsert_estimate_item(story, &discipline, hours)?;
            println!(
                "Story {}: {} = {}h",
                item.story_id,
                item.discipline,
                format_number(item.hours)
            );
        }
        EstimateCommand::Move { story, direction } => {
            let direction: MoveDirection = direction.parse()?;
            if db.move_story(story, direction)? {
                println!("Moved story {}", story);
            } else {
                println!("Story {} is already at the edge", story);
            }
        }
        EstimateCommand::Rm { story } => {
            db.delete_story(story)?;
            println!("Removed story {}", story);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "estimate_tests.rs"]
mod tests;
