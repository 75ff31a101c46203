use crate::application_impl::*;
use crate::application_port::*;
use crate::client::TracingNotifier;
use crate::domain_port::*;
use crate::infra_fake::*;
use crate::infra_fs::*;
use crate::infra_http::*;
use crate::logger::*;
use crate::settings::Settings;
use nanoid::nanoid;
use reqwest::Url;
use std::sync::Arc;

/// The assembled client: everything a UI (or the CLI) needs, built once per
/// process. Backends are selected by settings strings exactly like the
/// service wiring on the server side of this stack.
pub struct Client {
    pub api: Arc<dyn ApiClient>,
    pub auth_api: Arc<dyn AuthApi>,
    pub session: Arc<dyn SessionService>,
    pub run_id: String,
}

impl Client {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let alphabet: [char; 16] = [
            '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f',
        ];
        let run_id = nanoid!(10, &alphabet);

        let base: Url = settings.api.base_url.parse()?;

        let store: Arc<dyn LocalStore> = match settings.storage.backend.as_str() {
            "fake" => Arc::new(FakeLocalStore::new()),
            "file" => Arc::new(FileLocalStore::new(&settings.storage.path)),
            other => return Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
        };

        let (transport, jar): (Arc<dyn Transport>, Arc<dyn CookieJar>) =
            match settings.api.backend.as_str() {
                "fake" => (Arc::new(fake_backend()), Arc::new(FakeCookieJar::new())),
                "real" => {
                    let shared = SharedCookieJar::new(base.clone());
                    let transport = ReqwestTransport::new(shared.inner())?;
                    (Arc::new(transport), Arc::new(shared))
                }
                other => return Err(anyhow::anyhow!("Unknown api backend: {}", other)),
            };

        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
        let csrf = Arc::new(CsrfResolver::new(
            transport.clone(),
            jar.clone(),
            base.join(CSRF_TOKEN_PATH)?,
        ));
        let api: Arc<dyn ApiClient> = Arc::new(RequestPipeline::new(
            transport,
            store.clone(),
            csrf,
            notifier,
            base,
        ));
        let auth_api: Arc<dyn AuthApi> = Arc::new(HttpAuthApi::new(api.clone(), store.clone()));
        let session: Arc<dyn SessionService> =
            Arc::new(RealSessionService::restore(api.clone(), store).await);

        info!(run_id, "client assembled");
        Ok(Client {
            api,
            auth_api,
            session,
            run_id,
        })
    }

    /// A fresh guard for entering the authenticated area; the check runs
    /// once per guard instance.
    pub fn bootstrap(&self) -> SessionBootstrap {
        SessionBootstrap::new(self.auth_api.clone(), self.session.clone())
    }
}
