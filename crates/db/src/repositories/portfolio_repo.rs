//! Repository for the `portfolios` table and the feed/admin listings.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::portfolio::{
    AdminPortfolioFilter, AdminPortfolioRow, CreatePortfolio, FeedFilter, FeedPortfolio,
    Portfolio, UpdatePortfolio,
};

const COLUMNS: &str = "id, user_id, title, description, template_id, is_public, \
                       category, skills, content, created_at, updated_at";

/// Feed projection. Like and comment counts come from grouped subqueries
/// joined once, so a page costs a single round trip.
const FEED_SELECT: &str = "\
    SELECT p.id, p.user_id, u.display_name AS owner_display_name, p.title, p.description, \
           p.template_id, p.is_public, p.category, p.skills, \
           COALESCE(l.cnt, 0) AS like_count, COALESCE(c.cnt, 0) AS comment_count, \
           p.created_at, p.updated_at \
    FROM portfolios p \
    JOIN users u ON u.id = p.user_id \
    LEFT JOIN (SELECT portfolio_id, COUNT(*) AS cnt FROM portfolio_likes GROUP BY portfolio_id) l \
           ON l.portfolio_id = p.id \
    LEFT JOIN (SELECT portfolio_id, COUNT(*) AS cnt FROM portfolio_comments GROUP BY portfolio_id) c \
           ON c.portfolio_id = p.id";

pub struct PortfolioRepo;

impl PortfolioRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePortfolio,
    ) -> Result<Portfolio, sqlx::Error> {
        let query = format!(
            "INSERT INTO portfolios \
                (user_id, title, description, template_id, is_public, category, skills, content) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.template_id)
            .bind(input.is_public)
            .bind(&input.category)
            .bind(&input.skills)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Portfolio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolios WHERE id = $1");
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's own portfolios, most recently updated first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Portfolio>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolios WHERE user_id = $1 ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Returns `None` if the portfolio is gone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePortfolio,
    ) -> Result<Option<Portfolio>, sqlx::Error> {
        let query = format!(
            "UPDATE portfolios SET \
                title = COALESCE($2, title), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                template_id = COALESCE($5, template_id), \
                category = CASE WHEN $6 THEN $7 ELSE category END, \
                skills = COALESCE($8, skills), \
                content = COALESCE($9, content) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(&input.template_id)
            .bind(input.category.is_some())
            .bind(input.category.clone().flatten())
            .bind(&input.skills)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_visibility(
        pool: &PgPool,
        id: DbId,
        is_public: bool,
    ) -> Result<Option<Portfolio>, sqlx::Error> {
        let query = format!(
            "UPDATE portfolios SET is_public = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(id)
            .bind(is_public)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Public portfolios for the community feed, newest first.
    pub async fn list_public_feed(
        pool: &PgPool,
        filter: &FeedFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FeedPortfolio>, sqlx::Error> {
        let mut conditions: Vec<String> = vec!["p.is_public".to_string()];
        let mut param_idx: usize = 1;

        if filter.category.is_some() {
            conditions.push(format!("p.category = ${param_idx}"));
            param_idx += 1;
        }
        if filter.skill.is_some() {
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM unnest(p.skills) s WHERE lower(s) = lower(${param_idx}))"
            ));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(p.title ILIKE ${param_idx} OR p.description ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let query = format!(
            "{FEED_SELECT} WHERE {} \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            conditions.join(" AND "),
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, FeedPortfolio>(&query);
        if let Some(category) = filter.category {
            q = q.bind(category);
        }
        if let Some(skill) = filter.skill {
            q = q.bind(skill);
        }
        if let Some(search) = filter.search {
            q = q.bind(search);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// One feed entry, regardless of visibility. Callers gate on `is_public`.
    pub async fn find_feed_entry(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FeedPortfolio>, sqlx::Error> {
        let query = format!("{FEED_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, FeedPortfolio>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every portfolio with its owner, for the admin console.
    pub async fn list_admin(
        pool: &PgPool,
        filter: &AdminPortfolioFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AdminPortfolioRow>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.is_public.is_some() {
            conditions.push(format!("p.is_public = ${param_idx}"));
            param_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("p.category = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(p.title ILIKE ${param_idx} OR u.email ILIKE ${param_idx} \
                  OR u.display_name ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT p.id, p.user_id, u.email AS owner_email, u.display_name AS owner_display_name, \
                    p.title, p.template_id, p.is_public, p.category, p.created_at, p.updated_at \
             FROM portfolios p \
             JOIN users u ON u.id = p.user_id \
             {where_clause} \
             ORDER BY p.created_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, AdminPortfolioRow>(&query);
        if let Some(is_public) = filter.is_public {
            q = q.bind(is_public);
        }
        if let Some(category) = filter.category {
            q = q.bind(category);
        }
        if let Some(search) = filter.search {
            q = q.bind(search);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }
}
