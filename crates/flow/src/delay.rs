use std::time::Duration;

/// Simulated typing latency before a reply appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    pub base: Duration,
    pub per_char: Duration,
    pub max: Duration,
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self::fixed(Duration::from_millis(1000))
    }
}

impl TypingDelay {
    pub const fn none() -> Self {
        Self {
            base: Duration::ZERO,
            per_char: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub const fn fixed(delay: Duration) -> Self {
        Self {
            base: delay,
            per_char: Duration::ZERO,
            max: delay,
        }
    }

    pub fn for_reply(&self, text: &str) -> Duration {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        self.base
            .saturating_add(self.per_char.saturating_mul(chars))
            .min(self.max)
    }

    /// Waits out the delay for `text`. Dropping the future cancels the wait.
    pub async fn wait_for(&self, text: &str) {
        let delay = self.for_reply(text);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_delay_ignores_length() {
        let delay = TypingDelay::fixed(Duration::from_millis(1000));
        assert_eq!(delay.for_reply(""), Duration::from_millis(1000));
        assert_eq!(delay.for_reply(&"x".repeat(500)), Duration::from_millis(1000));
    }

    #[test]
    fn scaled_delay_is_capped() {
        let delay = TypingDelay {
            base: Duration::from_millis(300),
            per_char: Duration::from_millis(20),
            max: Duration::from_millis(1000),
        };

        assert_eq!(delay.for_reply("abcde"), Duration::from_millis(400));
        // Characters, not bytes.
        assert_eq!(delay.for_reply("ãé"), Duration::from_millis(340));
        assert_eq!(delay.for_reply(&"x".repeat(200)), Duration::from_millis(1000));
    }

    #[test]
    fn none_is_zero() {
        assert!(TypingDelay::none().for_reply("qualquer coisa").is_zero());
    }
}
