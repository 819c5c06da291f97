/*
 * Responsibility
 * - services (catalog) reads
 * - Sort order by price is chosen from a closed enum, never from raw input
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct ServiceRow {
    #[sqlx(rename = "serviceId")]
    pub service_id: i64,
    pub title: String,
    pub price: f64,
    pub img: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrder {
    Ascending,
    Descending,
}

impl PriceOrder {
    /// `asc` sorts cheapest first; anything else (including absence) sorts most expensive first.
    pub fn from_query(sort: Option<&str>) -> Self {
        match sort {
            Some("asc") => Self::Ascending,
            _ => Self::Descending,
        }
    }
}

pub async fn list(db: &PgPool, order: PriceOrder) -> RepoResult<Vec<ServiceRow>> {
    let sql = match order {
        PriceOrder::Ascending => {
            r#"
            SELECT "serviceId", title, price, img, description
            FROM services
            ORDER BY price ASC, "serviceId" ASC
            "#
        }
        PriceOrder::Descending => {
            r#"
            SELECT "serviceId", title, price, img, description
            FROM services
            ORDER BY price DESC, "serviceId" ASC
            "#
        }
    };

    let rows = sqlx::query_as::<_, ServiceRow>(sql).fetch_all(db).await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, service_id: i64) -> RepoResult<Option<ServiceRow>> {
    let row = sqlx::query_as::<_, ServiceRow>(
        r#"
        SELECT "serviceId", title, price, img, description
        FROM services
        WHERE "serviceId" = $1
        "#,
    )
    .bind(service_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
