use crate::actors::messages::AppError;
use crate::actors::selector::ThreadRngSelector;
use crate::actors::traits::{CompletionEngine, ProfileStore, ReplySelector};
use crate::brain::{assemble, AssembledPrompt, Intent, MessageAnalysis, MessageAnalyzer};
use crate::models::{ChatReply, ChatRequest, Skill, Turn};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Replies used when the user is only saying thanks. Picked uniformly at random.
pub const CANNED_REPLIES: [&str; 5] = [
    "You're welcome! Happy to help with your career journey.",
    "Glad I could help! Feel free to ask anything else.",
    "Anytime! Keep building those skills.",
    "Thank you! Let me know if you need more guidance.",
    "Happy to help! Best of luck with your goals.",
];

/// Sent when the engine answered but gave nothing usable.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't generate a response. Please try rephrasing your question.";

/// Sent when a collaborator call failed.
pub const APOLOGY_REPLY: &str =
    "Sorry, something went wrong while processing your request. Please try again later.";

/// Which way a request went after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePath {
    /// Canned reply, no engine call
    ShortCircuit,
    /// Engine answered with usable text
    Delegated,
    /// Engine answered with nothing usable
    Degenerate,
    /// A collaborator failed
    Failed,
}

/// The routing decision for one request together with the reply it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedReply {
    pub path: RoutePath,
    pub reply: ChatReply,
}

/// Decides between a canned reply and an engine call, and always answers.
///
/// Holds no per-request state: every request builds its own analysis and prompt,
/// so one router is shared by all concurrent requests.
pub struct ReplyRouter<C, P>
where
    C: CompletionEngine,
    P: ProfileStore,
{
    analyzer: MessageAnalyzer,
    completion: Arc<C>,
    profiles: Arc<P>,
    selector: Arc<dyn ReplySelector>,
}

impl<C, P> ReplyRouter<C, P>
where
    C: CompletionEngine,
    P: ProfileStore,
{
    pub fn new(completion: Arc<C>, profiles: Arc<P>) -> Self {
        Self::with_selector(completion, profiles, Arc::new(ThreadRngSelector))
    }

    pub fn with_selector(completion: Arc<C>, profiles: Arc<P>, selector: Arc<dyn ReplySelector>) -> Self {
        Self {
            analyzer: MessageAnalyzer::new(),
            completion,
            profiles,
            selector,
        }
    }

    /// Validates a transport request, then routes it.
    ///
    /// Validation errors are the only errors returned; they belong to the caller.
    pub async fn handle_request(&self, request: &ChatRequest) -> Result<ChatReply, AppError> {
        request.validate()?;
        Ok(self
            .handle_chat(&request.user_id, &request.message, &request.history)
            .await)
    }

    /// Produce the assistant reply for one message. Never fails.
    pub async fn handle_chat(&self, user_id: &str, message: &str, history: &[Turn]) -> ChatReply {
        self.route(user_id, message, history).await.reply
    }

    /// Like [`handle_chat`](Self::handle_chat) but also reports which path was taken.
    #[instrument(skip(self, message, history), fields(request_id = %Uuid::new_v4(), history_len = history.len()))]
    pub async fn route(&self, user_id: &str, message: &str, history: &[Turn]) -> RoutedReply {
        let analysis = self.analyzer.analyze(message);
        info!("{}", analysis.summary());
        debug!(text = %analysis.raw, "Analyzed message");

        if analysis.intent() == Intent::Appreciation {
            let reply = self.canned_reply();
            info!(path = "short_circuit", "Answered with canned reply");
            return RoutedReply {
                path: RoutePath::ShortCircuit,
                reply: ChatReply::assistant(reply),
            };
        }

        match self.delegate(user_id, &analysis, history).await {
            Ok(Some(text)) => {
                info!(path = "delegated", reply_len = text.len(), "Engine answered");
                RoutedReply {
                    path: RoutePath::Delegated,
                    reply: ChatReply::assistant(text),
                }
            }
            Ok(None) => {
                warn!(path = "degenerate", "Engine returned no usable text");
                RoutedReply {
                    path: RoutePath::Degenerate,
                    reply: ChatReply::assistant(FALLBACK_REPLY),
                }
            }
            Err(e) => {
                error!(path = "failed", "Error processing chat message: {}", e);
                RoutedReply {
                    path: RoutePath::Failed,
                    reply: ChatReply::assistant(APOLOGY_REPLY),
                }
            }
        }
    }

    fn canned_reply(&self) -> &'static str {
        let index = self.selector.pick(CANNED_REPLIES.len());
        CANNED_REPLIES[index % CANNED_REPLIES.len()]
    }

    /// Assemble the prompt, call the engine once, and trim its first candidate.
    ///
    /// `Ok(None)` means the engine answered without usable text.
    async fn delegate(
        &self,
        user_id: &str,
        analysis: &MessageAnalysis,
        history: &[Turn],
    ) -> Result<Option<String>, AppError> {
        // Skills are only rendered for career advice, so only then is the store asked.
        let skills: Vec<Skill> = if analysis.intent() == Intent::CareerAdvice {
            self.profiles.fetch_skills(user_id).await?
        } else {
            Vec::new()
        };

        let prompt = AssembledPrompt::new(assemble(analysis, &skills), history);
        debug!(system_context = %prompt.system_context, turns = prompt.conversation.len(), "Prompt assembled");

        let response = self.completion.complete(prompt.conversation).await?;

        Ok(response
            .first_candidate_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::messages::{ActorError, CompletionResponse};
    use crate::models::ChatTurn;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // --- Mock Actors ---

    struct MockCompletion {
        response: Result<CompletionResponse, AppError>,
        calls: AtomicUsize,
        last_conversation: Mutex<Option<Vec<ChatTurn>>>,
    }

    impl MockCompletion {
        fn new(response: Result<CompletionResponse, AppError>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                last_conversation: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionEngine for MockCompletion {
        async fn complete(&self, conversation: Vec<ChatTurn>) -> Result<CompletionResponse, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_conversation.lock().unwrap() = Some(conversation);
            self.response.clone()
        }
    }

    struct MockProfiles {
        skills: Vec<Skill>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProfileStore for MockProfiles {
        async fn fetch_skills(&self, _user_id: &str) -> Result<Vec<Skill>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.skills.clone())
        }
    }

    struct FixedSelector(usize);

    impl ReplySelector for FixedSelector {
        fn pick(&self, _len: usize) -> usize {
            self.0
        }
    }

    fn router(
        response: Result<CompletionResponse, AppError>,
    ) -> (ReplyRouter<MockCompletion, MockProfiles>, Arc<MockCompletion>, Arc<MockProfiles>) {
        let completion = Arc::new(MockCompletion::new(response));
        let profiles = Arc::new(MockProfiles {
            skills: vec![],
            calls: AtomicUsize::new(0),
        });
        let router = ReplyRouter::with_selector(completion.clone(), profiles.clone(), Arc::new(FixedSelector(2)));
        (router, completion, profiles)
    }

    #[tokio::test]
    async fn test_appreciation_short_circuits() {
        let (router, completion, profiles) = router(Ok(CompletionResponse::from_text("unused")));

        let routed = router.route("u1", "Thanks a lot!", &[]).await;

        assert_eq!(routed.path, RoutePath::ShortCircuit);
        assert_eq!(routed.reply.content, CANNED_REPLIES[2]);
        assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let (router, _, _) = router(Ok(CompletionResponse::from_text("  Recursion is...\n")));

        let routed = router.route("u1", "explain recursion", &[]).await;
        assert_eq!(routed.path, RoutePath::Delegated);
        assert_eq!(routed.reply.content, "Recursion is...");
    }

    #[tokio::test]
    async fn test_engine_receives_history_then_new_turn() {
        let (router, completion, _) = router(Ok(CompletionResponse::from_text("fine")));
        let history = vec![Turn::user("hi"), Turn::assistant("hello")];

        router.handle_chat("u1", "explain recursion", &history).await;

        let sent = completion.last_conversation.lock().unwrap().clone().unwrap();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].content, "hi");
        assert_eq!(sent[1].content, "hello");
        assert!(sent[2].content.ends_with("User: explain recursion"));
    }

    #[tokio::test]
    async fn test_whitespace_only_answer_is_degenerate() {
        let (router, _, _) = router(Ok(CompletionResponse::from_text("   ")));

        let routed = router.route("u1", "explain recursion", &[]).await;
        assert_eq!(routed.path, RoutePath::Degenerate);
        assert_eq!(routed.reply.content, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_engine_error_is_apology() {
        let (router, _, _) = router(Err(AppError::Actor(ActorError::LlmError("down".to_string()))));

        let routed = router.route("u1", "explain recursion", &[]).await;
        assert_eq!(routed.path, RoutePath::Failed);
        assert_eq!(routed.reply.content, APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn test_definition_does_not_fetch_skills() {
        let (router, completion, profiles) = router(Ok(CompletionResponse::from_text("ok")));

        router.handle_chat("u1", "what is docker", &[]).await;
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 0);
        assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_error_returned_to_caller() {
        let (router, completion, _) = router(Ok(CompletionResponse::from_text("ok")));

        let request = ChatRequest {
            user_id: "u1".to_string(),
            message: "   ".to_string(),
            history: vec![],
        };
        let result = router.handle_request(&request).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fixed_strings_are_distinct() {
        assert_ne!(FALLBACK_REPLY, APOLOGY_REPLY);
        assert!(!CANNED_REPLIES.contains(&FALLBACK_REPLY));
        assert!(!CANNED_REPLIES.contains(&APOLOGY_REPLY));
    }
}
