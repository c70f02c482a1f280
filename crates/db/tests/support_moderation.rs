//! Integration tests for support tickets and content reports.

mod common;

use folio_core::support::{STATUS_CLOSED, STATUS_IN_PROGRESS, STATUS_OPEN};
use folio_db::models::report::CreateReport;
use folio_db::repositories::{ReportRepo, SupportRepo, UserRepo};
use sqlx::PgPool;

use common::{create_portfolio, create_user};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ticket_lifecycle(pool: PgPool) {
    let user = create_user(&pool, "help@example.com", Some("Needy")).await;
    let admin = create_user(&pool, "admin@example.com", Some("Admin")).await;
    UserRepo::update_user_role(&pool, admin.id, "admin").await.unwrap();

    let ticket = SupportRepo::create_ticket(&pool, user.id).await.unwrap();
    assert_eq!(ticket.status, STATUS_OPEN);

    let active = SupportRepo::find_active_for_user(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, ticket.id);

    let assigned = SupportRepo::assign(&pool, ticket.id, admin.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.status, STATUS_IN_PROGRESS);
    assert_eq!(assigned.admin_id, Some(admin.id));

    SupportRepo::set_status(&pool, ticket.id, STATUS_CLOSED)
        .await
        .unwrap();
    assert!(SupportRepo::find_active_for_user(&pool, user.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_messages_bump_last_updated_and_carry_sender(pool: PgPool) {
    let user = create_user(&pool, "m@example.com", Some("Mia")).await;
    let ticket = SupportRepo::create_ticket(&pool, user.id).await.unwrap();

    SupportRepo::add_message(&pool, ticket.id, user.id, "hello")
        .await
        .unwrap();
    SupportRepo::add_message(&pool, ticket.id, user.id, "anyone?")
        .await
        .unwrap();

    let after = SupportRepo::find_ticket(&pool, ticket.id)
        .await
        .unwrap()
        .unwrap();
    assert!(after.last_updated >= ticket.last_updated);

    let messages = SupportRepo::list_messages(&pool, ticket.id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message, "hello");
    assert_eq!(messages[0].sender_display_name.as_deref(), Some("Mia"));
    assert_eq!(messages[0].sender_tier, "free");

    let summaries = SupportRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].message_count, 2);
    assert_eq!(summaries[0].requester_email, "m@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_all_filters_by_status(pool: PgPool) {
    let a = create_user(&pool, "a@example.com", None).await;
    let b = create_user(&pool, "b@example.com", None).await;
    let open = SupportRepo::create_ticket(&pool, a.id).await.unwrap();
    let closed = SupportRepo::create_ticket(&pool, b.id).await.unwrap();
    SupportRepo::set_status(&pool, closed.id, STATUS_CLOSED)
        .await
        .unwrap();

    let all = SupportRepo::list_all(&pool, None, 50, 0).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_open = SupportRepo::list_all(&pool, Some(STATUS_OPEN), 50, 0)
        .await
        .unwrap();
    assert_eq!(only_open.len(), 1);
    assert_eq!(only_open[0].id, open.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reports_group_by_target(pool: PgPool) {
    let owner = create_user(&pool, "o@example.com", None).await;
    let r1 = create_user(&pool, "r1@example.com", None).await;
    let r2 = create_user(&pool, "r2@example.com", None).await;
    let p = create_portfolio(&pool, owner.id, "Reported", true).await;

    for (reporter, reason) in [(r1.id, "spam"), (r2.id, "offensive")] {
        ReportRepo::create(
            &pool,
            &CreateReport {
                reporter_id: reporter,
                target_type: "portfolio".to_string(),
                target_id: p.id,
                reason: reason.to_string(),
            },
        )
        .await
        .unwrap();
    }

    let groups = ReportRepo::list_grouped(&pool, Some("pending"), 50, 0)
        .await
        .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].target_id, p.id);
    assert_eq!(groups[0].report_count, 2);
    assert_eq!(groups[0].reasons, vec!["spam", "offensive"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settle_only_pending(pool: PgPool) {
    let owner = create_user(&pool, "o@example.com", None).await;
    let admin = create_user(&pool, "admin@example.com", None).await;
    let p = create_portfolio(&pool, owner.id, "Reported", true).await;
    let report = ReportRepo::create(
        &pool,
        &CreateReport {
            reporter_id: owner.id,
            target_type: "portfolio".to_string(),
            target_id: p.id,
            reason: "test".to_string(),
        },
    )
    .await
    .unwrap();

    let settled = ReportRepo::settle(&pool, report.id, "ignored", admin.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(settled.status, "ignored");
    assert_eq!(settled.resolved_by, Some(admin.id));
    assert!(settled.resolved_at.is_some());

    let again = ReportRepo::settle(&pool, report.id, "resolved", admin.id)
        .await
        .unwrap();
    assert!(again.is_none());
}
