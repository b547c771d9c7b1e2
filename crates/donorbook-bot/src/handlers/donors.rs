//! Roster management: `/add_donor`, `/add_many`, `/remove_donor`, `/donors`.

use donorbook_store::{Pool, Result};
use tracing::info;

use super::numbered_list;

pub async fn add_donor(pool: &Pool, args: Option<&str>) -> Result<String> {
    let Some(last_name) = args.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok("Использование: /add_donor ФАМИЛИЯ".to_string());
    };

    let name = last_name.to_string();
    if pool.run(move |db| db.add_donor(&name)).await? {
        info!(donor = %last_name, "donor added");
        Ok(format!("Донор {last_name} добавлен."))
    } else {
        Ok(format!("Донор {last_name} уже существует."))
    }
}

pub async fn add_many(pool: &Pool, args: Option<&str>) -> Result<String> {
    let last_names: Vec<String> = args
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if last_names.is_empty() {
        return Ok("Использование: /add_many ФАМИЛИЯ1 ФАМИЛИЯ2 ФАМИЛИЯ3 ...".to_string());
    }

    let outcome = pool.run(move |db| db.add_donors(&last_names)).await?;
    info!(
        added = outcome.added.len(),
        existed = outcome.existed.len(),
        "batch donor add"
    );

    let mut lines = Vec::new();
    if !outcome.added.is_empty() {
        lines.push(format!("Добавлены: {}", outcome.added.join(", ")));
    }
    if !outcome.existed.is_empty() {
        lines.push(format!("Уже существуют: {}", outcome.existed.join(", ")));
    }

    Ok(lines.join("\n"))
}

pub async fn remove_donor(pool: &Pool, args: Option<&str>) -> Result<String> {
    let Some(last_name) = args.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok("Использование: /remove_donor ФАМИЛИЯ".to_string());
    };

    let name = last_name.to_string();
    if pool.run(move |db| db.remove_donor(&name)).await? {
        info!(donor = %last_name, "donor removed");
        Ok(format!("Донор {last_name} удалён."))
    } else {
        Ok(super::donor_not_found(last_name))
    }
}

pub async fn list_donors(pool: &Pool) -> Result<String> {
    let donors = pool.run(|db| db.list_donors()).await?;

    if donors.is_empty() {
        return Ok("Список доноров пуст.".to_string());
    }

    Ok(numbered_list("Список доноров:".to_string(), &donors))
}
