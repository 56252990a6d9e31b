use crate::config::DeploymentContext;

/// Ambient switches deciding whether GitHub may be called at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundPolicy {
    pub context: DeploymentContext,
    pub force_skip: bool,
    pub force_enable: bool,
}

impl OutboundPolicy {
    pub fn new(context: DeploymentContext) -> Self {
        Self {
            context,
            force_skip: false,
            force_enable: false,
        }
    }

    /// Production client context with the explicit opt-in set
    pub fn enabled() -> Self {
        Self {
            force_enable: true,
            ..Self::new(DeploymentContext::ProductionClient)
        }
    }

    /// True when no outbound call should be attempted
    pub fn should_skip(&self) -> bool {
        match self.context {
            DeploymentContext::Test
            | DeploymentContext::Development
            | DeploymentContext::ProductionServer => true,
            _ if self.force_skip => true,
            DeploymentContext::ProductionClient => !self.force_enable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_client_contexts_always_skip() {
        for context in [
            DeploymentContext::Test,
            DeploymentContext::Development,
            DeploymentContext::ProductionServer,
        ] {
            let mut policy = OutboundPolicy::new(context);
            assert!(policy.should_skip(), "{context} should skip");
            policy.force_enable = true;
            assert!(policy.should_skip(), "{context} should skip even when enabled");
        }
    }

    #[test]
    fn test_production_client_requires_opt_in() {
        let policy = OutboundPolicy::new(DeploymentContext::ProductionClient);
        assert!(policy.should_skip());
        assert!(!OutboundPolicy::enabled().should_skip());
    }

    #[test]
    fn test_force_skip_wins_over_enable() {
        let policy = OutboundPolicy {
            force_skip: true,
            ..OutboundPolicy::enabled()
        };
        assert!(policy.should_skip());
    }
}
