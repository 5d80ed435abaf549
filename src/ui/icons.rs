pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const SEED: &str = "🌱";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
}
