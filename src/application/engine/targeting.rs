//! Target resolution flow - binds a workflow to one roster entity.
//!
//! Shared by onboarding and dossier editing: prompt for a free-text query,
//! run the resolver, and when the query is ambiguous delegate to a
//! single-choice prompt with its own bounded wait and cancel affordance.
//! Timeout or cancel at any hop aborts the whole workflow; no partial state
//! is committed.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::roster::{resolve, Resolution, RosterEntry};
use crate::ports::{ChatClient, ChoicePrompt, ChoiceReply, SelectOption, TextPrompt};

/// Wait for the member-query modal.
pub const TARGET_PROMPT_WINDOW: Duration = Duration::from_secs(120);

/// Wait for the ambiguous-match selection.
pub const DISAMBIGUATION_WINDOW: Duration = Duration::from_secs(60);

/// Prompts the actor for a member query and resolves it to a unique roster
/// entry.
///
/// Returns `Ok(None)` when the workflow should abort quietly: no modal
/// response, no match (after a notice), disambiguation timeout (after a
/// notice), or explicit cancel.
pub async fn resolve_target(
    client: &Arc<dyn ChatClient>,
    actor: &MemberId,
    prompt: TextPrompt,
) -> Result<Option<RosterEntry>, DomainError> {
    let query = match client
        .prompt_text(actor, prompt, TARGET_PROMPT_WINDOW)
        .await?
    {
        Some(query) => query,
        None => return Ok(None),
    };

    let roster = client.roster().await?;
    match resolve(&query, &roster) {
        Resolution::Unique(entry) => Ok(Some(entry)),
        Resolution::NotFound => {
            client
                .notice(
                    actor,
                    &format!("No member found matching **{}**.", query.trim()),
                )
                .await?;
            Ok(None)
        }
        Resolution::Ambiguous(candidates) => {
            disambiguate(client, actor, candidates).await
        }
    }
}

/// Runs the single-choice prompt over ambiguous candidates.
async fn disambiguate(
    client: &Arc<dyn ChatClient>,
    actor: &MemberId,
    candidates: Vec<RosterEntry>,
) -> Result<Option<RosterEntry>, DomainError> {
    let options = candidates
        .iter()
        .map(|e| {
            SelectOption::new(e.id.as_str(), &e.display_name).with_description(&e.username)
        })
        .collect();
    let prompt =
        ChoicePrompt::single("Multiple matches found - please choose:", options).cancellable();

    match client
        .prompt_choice(actor, prompt, DISAMBIGUATION_WINDOW)
        .await?
    {
        None => {
            client.notice(actor, "Selection timed out.").await?;
            Ok(None)
        }
        Some(ChoiceReply::Cancelled) => Ok(None),
        Some(ChoiceReply::Selected(values)) => {
            let picked = values.first().map(String::as_str).unwrap_or_default();
            Ok(candidates.into_iter().find(|e| e.id.as_str() == picked))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chat::ScriptedChatClient;

    fn member(id: &str) -> MemberId {
        MemberId::new(id).unwrap()
    }

    fn entry(id: &str, username: &str, display: &str) -> RosterEntry {
        RosterEntry::new(member(id), username, display)
    }

    fn client_with(roster: Vec<RosterEntry>) -> Arc<ScriptedChatClient> {
        Arc::new(ScriptedChatClient::new(roster))
    }

    fn as_port(client: &Arc<ScriptedChatClient>) -> Arc<dyn ChatClient> {
        Arc::clone(client) as Arc<dyn ChatClient>
    }

    fn prompt() -> TextPrompt {
        TextPrompt::short("Select Member", "Enter Member Name or ID")
    }

    #[tokio::test]
    async fn unique_match_binds_immediately() {
        let client = client_with(vec![entry("100", "thomasp", "Thomas Picklini")]);
        client.script_text(Some("thomas"));

        let target = resolve_target(&as_port(&client), &member("admin"), prompt())
            .await
            .unwrap();
        assert_eq!(target.unwrap().id, member("100"));
    }

    #[tokio::test]
    async fn no_modal_response_aborts_quietly() {
        let client = client_with(vec![entry("100", "thomasp", "Thomas Picklini")]);
        client.script_text(None);

        let target = resolve_target(&as_port(&client), &member("admin"), prompt())
            .await
            .unwrap();
        assert!(target.is_none());
        assert!(client.notices().is_empty());
    }

    #[tokio::test]
    async fn not_found_aborts_with_notice() {
        let client = client_with(vec![entry("100", "thomasp", "Thomas Picklini")]);
        client.script_text(Some("zebra"));

        let target = resolve_target(&as_port(&client), &member("admin"), prompt())
            .await
            .unwrap();
        assert!(target.is_none());
        assert!(client.notices()[0].1.contains("No member found matching"));
    }

    #[tokio::test]
    async fn ambiguous_selection_binds_chosen_candidate() {
        let client = client_with(vec![
            entry("100", "thomasp", "Thomas Picklini"),
            entry("200", "tedge", "Thomas Edge"),
        ]);
        client.script_text(Some("thomas"));
        client.script_choice(Some(ChoiceReply::Selected(vec!["200".to_string()])));

        let target = resolve_target(&as_port(&client), &member("admin"), prompt())
            .await
            .unwrap();
        assert_eq!(target.unwrap().display_name, "Thomas Edge");
    }

    #[tokio::test]
    async fn ambiguous_timeout_aborts_with_notice() {
        let client = client_with(vec![
            entry("100", "thomasp", "Thomas Picklini"),
            entry("200", "tedge", "Thomas Edge"),
        ]);
        client.script_text(Some("thomas"));
        client.script_choice(None);

        let target = resolve_target(&as_port(&client), &member("admin"), prompt())
            .await
            .unwrap();
        assert!(target.is_none());
        assert!(client.notices()[0].1.contains("timed out"));
    }

    #[tokio::test]
    async fn ambiguous_cancel_aborts_quietly() {
        let client = client_with(vec![
            entry("100", "thomasp", "Thomas Picklini"),
            entry("200", "tedge", "Thomas Edge"),
        ]);
        client.script_text(Some("thomas"));
        client.script_choice(Some(ChoiceReply::Cancelled));

        let target = resolve_target(&as_port(&client), &member("admin"), prompt())
            .await
            .unwrap();
        assert!(target.is_none());
        assert!(client.notices().is_empty());
    }
}
