use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{AnalysisReport, AnalysisRequest};

/// One blocking call to the assessment model. No retries; the caller decides
/// whether to resubmit.
pub struct AssessmentService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    timeout: Duration,
}

impl<L> AssessmentService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>, timeout: Duration) -> Self {
        Self {
            llm_client,
            timeout,
        }
    }

    pub async fn generate(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisReport, LlmClientError> {
        let content = tokio::time::timeout(self.timeout, self.llm_client.complete(request.prompt()))
            .await
            .map_err(|_| LlmClientError::Timeout(self.timeout))??;

        if content.trim().is_empty() {
            return Err(LlmClientError::InvalidResponse("empty report".to_string()));
        }

        Ok(AnalysisReport::new(content))
    }
}
