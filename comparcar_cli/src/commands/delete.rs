use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args;
use comparcar_lib::list_view::DELETE_PROMPT;
use comparcar_lib::{CachedClient, Notice};

#[derive(Args)]
pub struct DeleteArgs {
    /// Car ID
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

pub async fn run(args: &DeleteArgs, client: &CachedClient) -> Result<()> {
    let skip_prompt = args.yes;
    match delete_car(client, args.id, |prompt| skip_prompt || confirm(prompt)).await {
        None => {
            eprintln!("Cancelled");
            Ok(())
        }
        Some(notice) if notice.is_error() => bail!("{}", notice),
        Some(notice) => {
            eprintln!("{}", notice);
            Ok(())
        }
    }
}

/// Asks `confirm`, then deletes car `id`. Returns `None` when declined.
async fn delete_car<C>(client: &CachedClient, id: i64, confirm: C) -> Option<Notice>
where
    C: FnOnce(&str) -> bool,
{
    if !confirm(DELETE_PROMPT) {
        return None;
    }
    match client.delete_car(id).await {
        Ok(()) => Some(Notice::car_deleted()),
        Err(e) => {
            tracing::debug!("Delete of car {} failed: {}", id, e);
            Some(Notice::delete_failed())
        }
    }
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = io::stderr().flush();
    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(_) => false,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use comparcar_lib::cache::MemoryCache;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CachedClient {
        CachedClient::with_base_url(
            &format!("{}/api", server.uri()),
            MemoryCache::new(Duration::from_secs(60)),
        )
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("YES"));
        assert!(is_yes("  yes  "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[tokio::test]
    async fn test_delete_does_not_fetch_a_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/cars/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let notice = delete_car(&client, 3, |_| true).await;
        assert_eq!(notice, Some(Notice::car_deleted()));
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut asked = String::new();
        let notice = delete_car(&client, 3, |prompt| {
            asked = prompt.to_string();
            false
        })
        .await;
        assert_eq!(notice, None);
        assert_eq!(asked, DELETE_PROMPT);
    }

    #[tokio::test]
    async fn test_failed_delete_reports_error_notice() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/cars/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let notice = delete_car(&client, 404, |_| true).await;
        assert_eq!(notice, Some(Notice::delete_failed()));
    }
}
