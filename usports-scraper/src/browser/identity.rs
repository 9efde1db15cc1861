use rand::Rng;
use rand::seq::SliceRandom;

/// Desktop user agents rotated between sessions.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
];

/// Request identity and resource blocking applied to a session before its
/// first navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_agent: String,
    pub block_images: bool,
}

impl Identity {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let user_agent = USER_AGENTS.choose(rng).copied().unwrap_or(USER_AGENTS[0]);
        Self {
            user_agent: user_agent.to_string(),
            block_images: true,
        }
    }

    /// Command-line switches for Chromium-family browsers.
    pub fn chromium_args(&self) -> Vec<String> {
        let mut args = vec![format!("--user-agent={}", self.user_agent)];
        if self.block_images {
            args.push("--blink-settings=imagesEnabled=false".to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn random_identity_uses_known_agent() {
        let mut rng = SmallRng::seed_from_u64(7);
        let identity = Identity::random(&mut rng);
        assert!(USER_AGENTS.contains(&identity.user_agent.as_str()));
        assert!(identity.block_images);
    }

    #[test]
    fn chromium_args_carry_agent_and_image_blocking() {
        let identity = Identity {
            user_agent: "TestAgent/1.0".to_string(),
            block_images: true,
        };
        assert_eq!(
            identity.chromium_args(),
            vec![
                "--user-agent=TestAgent/1.0".to_string(),
                "--blink-settings=imagesEnabled=false".to_string(),
            ]
        );
    }

    #[test]
    fn images_stay_enabled_when_not_blocked() {
        let identity = Identity {
            user_agent: "TestAgent/1.0".to_string(),
            block_images: false,
        };
        assert_eq!(identity.chromium_args().len(), 1);
    }
}
