//! Integration tests for the onboarding flow.
//!
//! These tests drive the whole path end-to-end:
//! 1. Umbrella admin panel dispatches to the onboarding workflow
//! 2. Target resolution (unique and ambiguous queries)
//! 3. Rank selection and confirmation
//! 4. The dossier document on disk after the session ends
//!
//! Uses the scripted chat client and real JSON stores in a temp directory.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::time::{advance, sleep};

use rank_warden::adapters::chat::ScriptedChatClient;
use rank_warden::adapters::storage::{JsonCatalogStore, JsonDossierStore};
use rank_warden::application::engine::AccessGate;
use rank_warden::application::workflows::{
    AdminPanelWorkflow, DispatchContext, EditCatalogWorkflow, EditDossierWorkflow,
    OnboardWorkflow,
};
use rank_warden::domain::foundation::MemberId;
use rank_warden::domain::rank::DEFAULT_RANKS;
use rank_warden::domain::roster::RosterEntry;
use rank_warden::ports::{
    CatalogRepository, ChatClient, ChoiceReply, DossierRepository, PanelEvent,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn member(id: &str) -> MemberId {
    MemberId::new(id).unwrap()
}

fn roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new(member("100"), "thomasp", "Thomas Picklini"),
        RosterEntry::new(member("200"), "tedge", "Thomas Edge"),
    ]
}

struct Harness {
    _dir: TempDir,
    client: Arc<ScriptedChatClient>,
    dossiers: Arc<dyn DossierRepository>,
    panel: AdminPanelWorkflow,
}

async fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let client = Arc::new(ScriptedChatClient::new(roster()));
    let chat = Arc::clone(&client) as Arc<dyn ChatClient>;

    let dossiers = Arc::new(
        JsonDossierStore::load(dir.path().join("dossiers.json"))
            .await
            .unwrap(),
    ) as Arc<dyn DossierRepository>;
    let catalog = Arc::new(
        JsonCatalogStore::load(dir.path().join("specializations.json"))
            .await
            .unwrap(),
    ) as Arc<dyn CatalogRepository>;
    let ranks = Arc::new(DEFAULT_RANKS.clone());
    let gate = AccessGate::default();

    let onboard = Arc::new(OnboardWorkflow::new(
        Arc::clone(&chat),
        Arc::clone(&dossiers),
        Arc::clone(&ranks),
        gate.clone(),
    ));
    let edit_dossier = Arc::new(EditDossierWorkflow::new(
        Arc::clone(&chat),
        Arc::clone(&dossiers),
        Arc::clone(&catalog),
        Arc::clone(&ranks),
        gate.clone(),
    ));
    let edit_catalog = Arc::new(EditCatalogWorkflow::new(
        Arc::clone(&chat),
        Arc::clone(&catalog),
        gate.clone(),
    ));
    let panel = AdminPanelWorkflow::new(chat, gate, onboard, edit_dossier, edit_catalog);

    Harness {
        _dir: dir,
        client,
        dossiers,
        panel,
    }
}

fn admin_ctx() -> DispatchContext {
    DispatchContext::direct(member("admin"), "Cmdr. Vale")
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test(start_paused = true)]
async fn onboarding_through_the_admin_panel_persists_the_dossier() {
    let h = harness().await;

    h.client
        .script_event(PanelEvent::button(member("admin"), "add_players"));
    h.client.script_text(Some("picklini"));
    h.client.script_event(PanelEvent::select(
        member("admin"),
        "onboard_rank",
        vec!["o3".to_string()],
    ));
    h.client
        .script_event(PanelEvent::button(member("admin"), "onboard_confirm"));
    h.client
        .script_event(PanelEvent::button(member("admin"), "finish_admin"));

    h.panel.run(admin_ctx()).await.unwrap();

    let record = h.dossiers.get(&member("100")).await.unwrap().unwrap();
    assert_eq!(record.rank(), "O-3 | Captain");
    assert_eq!(record.notes().len(), 1);
    assert_eq!(
        record.notes()[0].text,
        "Onboarded at O-3 | Captain — by Cmdr. Vale"
    );
    assert!(record.specializations().is_empty());

    assert_eq!(
        h.client.assigned_roles(),
        vec![(member("100"), "O-3 | Captain".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn ambiguous_query_selects_the_chosen_candidate() {
    let h = harness().await;

    h.client
        .script_event(PanelEvent::button(member("admin"), "add_players"));
    h.client.script_text(Some("thomas"));
    h.client
        .script_choice(Some(ChoiceReply::Selected(vec!["200".to_string()])));
    h.client.script_event(PanelEvent::select(
        member("admin"),
        "onboard_rank",
        vec!["e1".to_string()],
    ));
    h.client
        .script_event(PanelEvent::button(member("admin"), "onboard_confirm"));
    h.client
        .script_event(PanelEvent::button(member("admin"), "finish_admin"));

    h.panel.run(admin_ctx()).await.unwrap();

    assert!(h.dossiers.get(&member("200")).await.unwrap().is_some());
    assert!(h.dossiers.get(&member("100")).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn ambiguous_query_with_no_selection_creates_nothing() {
    let h = harness().await;

    h.client
        .script_event(PanelEvent::button(member("admin"), "add_players"));
    h.client.script_text(Some("thomas"));
    h.client.script_choice(None);
    h.client
        .script_event(PanelEvent::button(member("admin"), "finish_admin"));

    h.panel.run(admin_ctx()).await.unwrap();

    assert_eq!(h.dossiers.count().await.unwrap(), 0);
    assert!(h
        .client
        .notices()
        .iter()
        .any(|(_, text)| text.contains("timed out")));
}

#[tokio::test(start_paused = true)]
async fn onboarding_twice_keeps_the_first_record() {
    let h = harness().await;

    // First onboarding.
    h.client
        .script_event(PanelEvent::button(member("admin"), "add_players"));
    h.client.script_text(Some("picklini"));
    h.client.script_event(PanelEvent::select(
        member("admin"),
        "onboard_rank",
        vec!["e1".to_string()],
    ));
    h.client
        .script_event(PanelEvent::button(member("admin"), "onboard_confirm"));
    // Second attempt against the same member.
    h.client
        .script_event(PanelEvent::button(member("admin"), "add_players"));
    h.client.script_text(Some("picklini"));
    h.client
        .script_event(PanelEvent::button(member("admin"), "finish_admin"));

    h.panel.run(admin_ctx()).await.unwrap();

    let record = h.dossiers.get(&member("100")).await.unwrap().unwrap();
    assert_eq!(record.rank(), "E-1 | Recruit");
    assert_eq!(record.notes().len(), 1);
    assert_eq!(h.dossiers.count().await.unwrap(), 1);
    assert!(h
        .client
        .notices()
        .iter()
        .any(|(_, text)| text.contains("already has a dossier entry")));
}

#[tokio::test(start_paused = true)]
async fn cancelled_onboarding_leaves_the_document_untouched() {
    let h = harness().await;

    h.client
        .script_event(PanelEvent::button(member("admin"), "add_players"));
    h.client.script_text(Some("picklini"));
    h.client.script_event(PanelEvent::select(
        member("admin"),
        "onboard_rank",
        vec!["o3".to_string()],
    ));
    h.client
        .script_event(PanelEvent::button(member("admin"), "onboard_cancel"));
    h.client
        .script_event(PanelEvent::button(member("admin"), "finish_admin"));

    h.panel.run(admin_ctx()).await.unwrap();

    assert_eq!(h.dossiers.count().await.unwrap(), 0);
}

#[tokio::test(start_paused = true)]
async fn panels_are_deleted_after_their_grace_delays() {
    let h = harness().await;

    h.client
        .script_event(PanelEvent::button(member("admin"), "finish_admin"));

    h.panel.run(admin_ctx()).await.unwrap();
    assert!(h.client.deleted_panels().is_empty());

    advance(Duration::from_secs(2)).await;
    sleep(Duration::from_millis(1)).await;

    assert_eq!(h.client.deleted_panels(), h.client.rendered_panels());
}
