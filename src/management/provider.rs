use std::sync::Mutex;

use tokio::sync::watch;

use crate::{
    errors::FinderError, management::TokenStore, spotify::auth::TokenSource, types::Token,
    warning,
};

/// Publishes the current session token to the rest of the application.
///
/// The token is obtained once per session through a [`TokenSource`]. Views
/// subscribe to changes instead of reading shared state.
pub struct TokenProvider<S: TokenStore> {
    store: S,
    current: watch::Sender<Option<Token>>,
    failure: Mutex<Option<FinderError>>,
}

impl<S: TokenStore> TokenProvider<S> {
    pub fn new(store: S) -> Self {
        let (current, _) = watch::channel(None);
        TokenProvider {
            store,
            current,
            failure: Mutex::new(None),
        }
    }

    /// Runs the source once and publishes its outcome.
    ///
    /// An authentication failure is sticky: every later call returns the same
    /// error without asking the source again.
    pub async fn initialize<T: TokenSource>(
        &self,
        source: &mut T,
    ) -> Result<Option<Token>, FinderError> {
        if let Some(err) = self.recorded_failure() {
            return Err(err);
        }

        match source.acquire(&self.store).await {
            Ok(token) => {
                self.current.send_replace(token.clone());
                Ok(token)
            }
            Err(err) => {
                warning!("Authentication failed: {}", err);
                self.current.send_replace(None);
                if matches!(err, FinderError::AuthFailure(_)) {
                    if let Ok(mut failure) = self.failure.lock() {
                        *failure = Some(err.clone());
                    }
                }
                Err(err)
            }
        }
    }

    /// Clears the durable slot and the in-memory token.
    pub async fn logout(&self) -> Result<(), FinderError> {
        self.store.clear().await?;
        self.current.send_replace(None);
        Ok(())
    }

    pub fn token(&self) -> Option<Token> {
        self.current.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Token>> {
        self.current.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn recorded_failure(&self) -> Option<FinderError> {
        self.failure.lock().ok().and_then(|f| f.clone())
    }
}
