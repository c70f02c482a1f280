//! Integration tests for likes and comments through the Postgres
//! engagement store.

mod common;

use folio_core::engagement::{load_snapshot, toggle_like};
use folio_db::repositories::{CommentRepo, LikeRepo};
use folio_db::PgEngagementStore;
use sqlx::PgPool;

use common::{create_portfolio, create_user};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_like_round_trip(pool: PgPool) {
    let owner = create_user(&pool, "o@example.com", None).await;
    let fan = create_user(&pool, "f@example.com", None).await;
    let p = create_portfolio(&pool, owner.id, "Liked", true).await;
    let store = PgEngagementStore::new(&pool);

    let first = toggle_like(&store, p.id, fan.id).await.unwrap();
    assert_eq!(first.like_count, 1);
    assert!(first.user_liked);

    let second = toggle_like(&store, p.id, fan.id).await.unwrap();
    assert_eq!(second.like_count, 0);
    assert!(!second.user_liked);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_like_insert_is_noop(pool: PgPool) {
    let owner = create_user(&pool, "o@example.com", None).await;
    let p = create_portfolio(&pool, owner.id, "Once", true).await;

    LikeRepo::insert(&pool, p.id, owner.id).await.unwrap();
    LikeRepo::insert(&pool, p.id, owner.id).await.unwrap();

    assert_eq!(LikeRepo::count(&pool, p.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_snapshot_resolves_names_newest_first(pool: PgPool) {
    let owner = create_user(&pool, "o@example.com", Some("Owner")).await;
    let anon = create_user(&pool, "a@example.com", None).await;
    let p = create_portfolio(&pool, owner.id, "Talked about", true).await;

    CommentRepo::create(&pool, p.id, owner.id, "first").await.unwrap();
    CommentRepo::create(&pool, p.id, anon.id, "second").await.unwrap();
    LikeRepo::insert(&pool, p.id, anon.id).await.unwrap();

    let store = PgEngagementStore::new(&pool);
    let snapshot = load_snapshot(&store, p.id, Some(anon.id)).await.unwrap();

    assert_eq!(snapshot.like_count, 1);
    assert!(snapshot.user_liked);
    assert_eq!(snapshot.comments.len(), 2);
    assert_eq!(snapshot.comments[0].content, "second");
    let expected: String = anon.id.to_string().chars().take(4).collect();
    assert_eq!(snapshot.comments[0].display_name, format!("User {expected}"));
    assert_eq!(snapshot.comments[1].display_name, "Owner");

    let anonymous = load_snapshot(&store, p.id, None).await.unwrap();
    assert!(!anonymous.user_liked);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_portfolio_cascades_engagement(pool: PgPool) {
    let owner = create_user(&pool, "o@example.com", None).await;
    let p = create_portfolio(&pool, owner.id, "Short lived", true).await;
    let comment = CommentRepo::create(&pool, p.id, owner.id, "hi").await.unwrap();
    LikeRepo::insert(&pool, p.id, owner.id).await.unwrap();

    folio_db::repositories::PortfolioRepo::delete(&pool, p.id)
        .await
        .unwrap();

    assert!(CommentRepo::find_by_id(&pool, comment.id).await.unwrap().is_none());
    assert_eq!(LikeRepo::count(&pool, p.id).await.unwrap(), 0);
}
