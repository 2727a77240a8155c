use std::future::Future;
use std::pin::Pin;

/// Text-generation collaborator: prompt in, text out.
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "gemini").
    fn name(&self) -> &str;

    fn chat<'a>(
        &'a self,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.chat_with_system(None, message, model, temperature)
                .await
        })
    }

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct EchoProvider {
        seen_system: Mutex<Option<String>>,
    }

    impl Provider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn chat_with_system<'a>(
            &'a self,
            system_prompt: Option<&'a str>,
            message: &'a str,
            _model: &'a str,
            _temperature: f64,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
            Box::pin(async move {
                *self.seen_system.lock().unwrap() = system_prompt.map(String::from);
                Ok(format!("echo: {message}"))
            })
        }
    }

    #[tokio::test]
    async fn chat_delegates_without_system_prompt() {
        let provider = EchoProvider {
            seen_system: Mutex::new(Some("stale".into())),
        };

        let reply = provider.chat("hi", "model", 0.0).await.unwrap();
        assert_eq!(reply, "echo: hi");
        assert!(provider.seen_system.lock().unwrap().is_none());
    }
}
