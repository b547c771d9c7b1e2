use donorbook_shared::ActorId;
use donorbook_store::{Pool, Result};
use tracing::info;

/// `/add_admin <telegram_id>`: grant access on top of the `ADMIN_IDS`
/// allowlist.
pub async fn add_admin(pool: &Pool, args: Option<&str>, granted_by: ActorId) -> Result<String> {
    let Some(raw) = args.and_then(|s| s.split_whitespace().next()) else {
        return Ok("Использование: /add_admin TELEGRAM_ID".to_string());
    };

    let Ok(id) = raw.parse::<ActorId>() else {
        return Ok(format!("Неверный идентификатор: {raw}"));
    };

    if pool.run(move |db| db.add_admin(id)).await? {
        info!(admin = %id, granted_by = %granted_by, "admin added");
        Ok(format!("Администратор {id} добавлен."))
    } else {
        Ok(format!("Администратор {id} уже существует."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::test_pool;

    #[tokio::test]
    async fn test_add_admin_replies() {
        let (pool, _dir) = test_pool();
        let me = ActorId(1);

        assert_eq!(
            add_admin(&pool, Some("555"), me).await.unwrap(),
            "Администратор 555 добавлен."
        );
        assert_eq!(
            add_admin(&pool, Some("555"), me).await.unwrap(),
            "Администратор 555 уже существует."
        );
        assert_eq!(
            add_admin(&pool, Some("@someone"), me).await.unwrap(),
            "Неверный идентификатор: @someone"
        );
        assert_eq!(
            add_admin(&pool, None, me).await.unwrap(),
            "Использование: /add_admin TELEGRAM_ID"
        );
        assert!(pool.run(|db| db.is_admin(ActorId(555))).await.unwrap());
    }
}
