use uuid::Uuid;

/// Generate a short random session seed
pub fn new_session_seed() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    simple[..8].to_string()
}

/// Sequential ID generator for widgets and list items within one editing session
///
/// IDs have the form `{seed}-{count}`. The seed is random per session so IDs
/// minted in different sessions never collide; callers that need to avoid IDs
/// already present in a loaded page use [`IdGenerator::new_id_avoiding`].
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::from_seed(new_session_seed())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate the next ID for which `taken` returns false
    pub fn new_id_avoiding(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id();
            if !taken(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
