//! Integration tests for the public tyrant listing and admin CRUD.

use sqlx::PgPool;
use tyrantcam_core::category::Category;
use tyrantcam_core::types::DbId;
use tyrantcam_db::models::tyrant::{CreateTyrant, Tyrant, UpdateTyrant};
use tyrantcam_db::repositories::{TyrantRepo, VoteRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_tyrant(name: &str, category: Category, published: bool) -> CreateTyrant {
    CreateTyrant {
        name: name.to_string(),
        title: "Official".to_string(),
        position: "Office Holder".to_string(),
        category: category.as_str().to_string(),
        description: "Did something shameful in public office.".to_string(),
        image_url: Some("https://example.org/portrait.jpg".to_string()),
        evidence_urls: vec!["https://example.org/article".to_string()],
        is_published: published,
    }
}

async fn create(pool: &PgPool, name: &str, category: Category, published: bool) -> Tyrant {
    TyrantRepo::create(pool, &new_tyrant(name, category, published))
        .await
        .expect("tyrant creation should succeed")
}

/// Give a tyrant `n` distinct votes.
async fn shame(pool: &PgPool, id: DbId, n: usize) {
    for i in 0..n {
        VoteRepo::cast(pool, id, &format!("{i:064x}")).await.unwrap();
    }
}

/// Pin `created_at` so ordering ties are deterministic.
async fn set_created_hours_ago(pool: &PgPool, id: DbId, hours: i32) {
    sqlx::query("UPDATE tyrants SET created_at = NOW() - make_interval(hours => $2) WHERE id = $1")
        .bind(id)
        .bind(hours)
        .execute(pool)
        .await
        .unwrap();
}

fn names(list: &[Tyrant]) -> Vec<&str> {
    list.iter().map(|t| t.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Test: unpublished tyrants never appear in the public listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_published_excludes_drafts(pool: PgPool) {
    create(&pool, "Visible", Category::Federal, true).await;
    let draft = create(&pool, "Hidden", Category::Federal, false).await;

    let listed = TyrantRepo::list_published(&pool, None, 50, 0).await.unwrap();
    assert_eq!(names(&listed), vec!["Visible"]);
    assert!(listed.iter().all(|t| t.is_published));

    // Publishing makes it visible; unpublishing hides it again.
    TyrantRepo::set_published(&pool, draft.id, true).await.unwrap();
    assert_eq!(TyrantRepo::list_published(&pool, None, 50, 0).await.unwrap().len(), 2);

    TyrantRepo::set_published(&pool, draft.id, false).await.unwrap();
    assert_eq!(TyrantRepo::list_published(&pool, None, 50, 0).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: ordering is shame_count desc, then created_at desc
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_published_state_ordering(pool: PgPool) {
    let old_quiet = create(&pool, "Old Quiet", Category::State, true).await;
    let new_quiet = create(&pool, "New Quiet", Category::State, true).await;
    let loud = create(&pool, "Loud", Category::State, true).await;
    let louder = create(&pool, "Louder", Category::State, true).await;
    let federal = create(&pool, "Federal", Category::Federal, true).await;
    let draft = create(&pool, "State Draft", Category::State, false).await;

    set_created_hours_ago(&pool, old_quiet.id, 10).await;
    set_created_hours_ago(&pool, new_quiet.id, 1).await;
    set_created_hours_ago(&pool, loud.id, 5).await;
    set_created_hours_ago(&pool, louder.id, 20).await;

    shame(&pool, loud.id, 2).await;
    shame(&pool, louder.id, 3).await;
    shame(&pool, federal.id, 9).await;
    // Drafts cannot be voted on; give it a counter directly to prove the
    // filter, not the counter, is what hides it.
    sqlx::query("UPDATE tyrants SET shame_count = 100 WHERE id = $1")
        .bind(draft.id)
        .execute(&pool)
        .await
        .unwrap();

    let listed = TyrantRepo::list_published(&pool, Some(Category::State), 50, 0)
        .await
        .unwrap();

    assert_eq!(
        names(&listed),
        vec!["Louder", "Loud", "New Quiet", "Old Quiet"]
    );
    assert!(listed.iter().all(|t| t.category == "state" && t.is_published));
    for pair in listed.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.shame_count, a.created_at) > (b.shame_count, b.created_at),
            "listing must be strictly ordered by (shame_count, created_at) desc"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: listing reflects the live counter immediately
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_published_reflects_votes_immediately(pool: PgPool) {
    let a = create(&pool, "Alpha", Category::Local, true).await;
    let b = create(&pool, "Bravo", Category::Local, true).await;
    set_created_hours_ago(&pool, a.id, 2).await;
    set_created_hours_ago(&pool, b.id, 1).await;

    let before = TyrantRepo::list_published(&pool, None, 50, 0).await.unwrap();
    assert_eq!(names(&before), vec!["Bravo", "Alpha"]);

    let vote = VoteRepo::cast(&pool, a.id, &"f".repeat(64)).await.unwrap();
    let after = TyrantRepo::list_published(&pool, None, 50, 0).await.unwrap();
    assert_eq!(names(&after), vec!["Alpha", "Bravo"]);
    assert_eq!(after[0].shame_count, 1);

    VoteRepo::revoke(&pool, vote.vote.id).await.unwrap();
    let reverted = TyrantRepo::list_published(&pool, None, 50, 0).await.unwrap();
    assert_eq!(names(&reverted), vec!["Bravo", "Alpha"]);
}

// ---------------------------------------------------------------------------
// Test: limit / offset paginate the ordered listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_published_pagination(pool: PgPool) {
    for (i, name) in ["P0", "P1", "P2", "P3", "P4"].iter().enumerate() {
        let t = create(&pool, name, Category::LawEnforcement, true).await;
        set_created_hours_ago(&pool, t.id, i as i32 + 1).await;
    }

    let page1 = TyrantRepo::list_published(&pool, None, 2, 0).await.unwrap();
    let page2 = TyrantRepo::list_published(&pool, None, 2, 2).await.unwrap();
    let page3 = TyrantRepo::list_published(&pool, None, 2, 4).await.unwrap();

    assert_eq!(names(&page1), vec!["P0", "P1"]);
    assert_eq!(names(&page2), vec!["P2", "P3"]);
    assert_eq!(names(&page3), vec!["P4"]);
}

// ---------------------------------------------------------------------------
// Test: admin listing includes drafts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_all_includes_drafts(pool: PgPool) {
    create(&pool, "Published", Category::Local, true).await;
    create(&pool, "Draft", Category::Local, false).await;
    create(&pool, "Other", Category::Federal, false).await;

    let all = TyrantRepo::list_all(&pool, None, 50, 0).await.unwrap();
    assert_eq!(all.len(), 3);

    let local = TyrantRepo::list_all(&pool, Some(Category::Local), 50, 0)
        .await
        .unwrap();
    assert_eq!(local.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: partial update and updated_at trigger
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_applies_only_present_fields(pool: PgPool) {
    let tyrant = create(&pool, "Before", Category::Local, true).await;

    let input = UpdateTyrant {
        name: Some("After".to_string()),
        category: Some("state".to_string()),
        ..Default::default()
    };
    let updated = TyrantRepo::update(&pool, tyrant.id, &input)
        .await
        .unwrap()
        .expect("tyrant should exist");

    assert_eq!(updated.name, "After");
    assert_eq!(updated.category, "state");
    assert_eq!(updated.title, tyrant.title);
    assert_eq!(updated.evidence_urls, tyrant.evidence_urls);
    assert!(updated.updated_at >= tyrant.updated_at);

    let missing = TyrantRepo::update(&pool, 999_999, &input).await.unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: find_published_by_id hides drafts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_published_by_id(pool: PgPool) {
    let published = create(&pool, "Out", Category::Federal, true).await;
    let draft = create(&pool, "In", Category::Federal, false).await;

    assert!(TyrantRepo::find_published_by_id(&pool, published.id)
        .await
        .unwrap()
        .is_some());
    assert!(TyrantRepo::find_published_by_id(&pool, draft.id)
        .await
        .unwrap()
        .is_none());
    assert!(TyrantRepo::find_by_id(&pool, draft.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Test: invalid category is rejected by the database
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_category_violates_check(pool: PgPool) {
    let mut input = new_tyrant("Bad Category", Category::Local, true);
    input.category = "county".to_string();

    let result = TyrantRepo::create(&pool, &input).await;
    assert!(result.is_err(), "category outside the enum must be rejected");
}
