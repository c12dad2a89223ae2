// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expertise, person, and department commands.

use rp_core::allocation::monthly_totals;
use rp_core::Database;

use super::open_db;
use crate::cli::{DeptCommand, ExpertiseCommand, PersonCommand};
use crate::display::format_person_totals;
use crate::error::{Error, Result};

const PERSON_EDITABLE: &str = "name, email, expertise";

pub fn run_expertise(command: ExpertiseCommand) -> Result<()> {
    let (db, _, _) = open_db()?;
    expertise_impl(&db, command)
}

pub(crate) fn expertise_impl(db: &Database, command: ExpertiseCommand) -> Result<()> {
    match command {
        ExpertiseCommand::Add { name } => {
            let expertise = db.create_expertise(&name)?;
            println!("Added expertise [{}] {}", expertise.id, expertise.name);
        }
        ExpertiseCommand::List => {
            for expertise in db.list_expertises()? {
                println!("[{}] {}", expertise.id, expertise.name);
            }
        }
        ExpertiseCommand::Rename { id, name } => {
            let old = db.get_expertise(id)?;
            let expertise = db.update_expertise(id, &name)?;
            println!(
                "Renamed expertise [{}] {} to {}",
                expertise.id, old.name, expertise.name
            );
        }
        ExpertiseCommand::Rm { id } => {
            let expertise = db.get_expertise(id)?;
            db.delete_expertise(id)?;
            println!("Removed expertise [{}] {}", expertise.id, expertise.name);
        }
    }
    Ok(())
}

pub fn run_person(command: PersonCommand) -> Result<()> {
    let (db, _, _) = open_db()?;
    person_impl(&db, command)
}

pub(crate) fn person_impl(db: &Database, command: PersonCommand) -> Result<()> {
    match command {
        PersonCommand::Add {
            name,
            expertise,
            email,
        } => {
            let expertise = db.get_expertise_by_name(&expertise)?;
            let person = db.create_person(&name, email.as_deref(), expertise.id)?;
            println!(
                "Added [{}] {} ({})",
                person.id, person.name, expertise.name
            );
        }
        PersonCommand::List => {
            let expertises = db.list_expertises()?;
            for person in db.list_people()? {
                let expertise = expertises
                    .iter()
                    .find(|e| e.id == person.expertise_id)
                    .map(|e| e.name.as_str())
                    .unwrap_or("?");
                match &person.email {
                    Some(email) => {
                        println!("[{}] {} ({}) <{}>", person.id, person.name, expertise, email)
                    }
                    None => println!("[{}] {} ({})", person.id, person.name, expertise),
                }
            }
        }
        PersonCommand::Show { id } => {
            let person = db.get_person(id)?;
            let allocations = db.allocations_for_person(id)?;
            let months = db.list_months(false)?;
            let totals = monthly_totals(&allocations, &months);
            println!("{}", format_person_totals(&person, &totals));
        }
        PersonCommand::Edit { id, attr, value } => edit_person(db, id, &attr, &value)?,
    }
    Ok(())
}

pub(crate) fn edit_person(db: &Database, id: i64, attr: &str, value: &str) -> Result<()> {
    let mut person = db.get_person(id)?;

    match attr.to_lowercase().as_str() {
        "name" => {
            let name = value.trim();
            if name.is_empty() {
                return Err(Error::InvalidArguments("name cannot be empty".to_string()));
            }
            person.name = name.to_string();
        }
        "email" => {
            let email = value.trim();
            person.email = if email.is_empty() || email.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(email.to_string())
            };
        }
        "expertise" => person.expertise_id = db.get_expertise_by_name(value.trim())?.id,
        _ => {
            return Err(Error::UnknownAttribute {
                attr: attr.to_string(),
                valid: PERSON_EDITABLE,
            })
        }
    }

    db.update_person(&person)?;
    println!(
        "Updated {} of [{}] {} to: {}",
        attr.to_lowercase(),
        person.id,
        person.name,
        value
    );
    Ok(())
}

pub fn run_dept(command: DeptCommand) -> Result<()> {
    let (db, _, _) = open_db()?;
    dept_impl(&db, command)
}

pub(crate) fn dept_impl(db: &Database, command: DeptCommand) -> Result<()> {
    match command {
        DeptCommand::Add { name, sort } => {
            let dept = db.create_department(&name, sort)?;
            println!("Added department [{}] {}", dept.id, dept.name);
        }
        DeptCommand::List => {
            for dept in db.departments_with_projects()? {
                println!(
                    "[{}] {} ({} projects)",
                    dept.id,
                    dept.name,
                    dept.projects.len()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod tests;
