/// A merged change request as supplied by the hosting service, used only for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequestSummary {
    pub id: u64,
    pub title: String,
    pub web_url: String,
    pub author_name: String,
    pub author_url: String,
}
