/// Probe for query-by-example lookups.
///
/// `Some` fields must match exactly, `None` fields are ignored. An empty
/// probe matches every member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberExample {
    pub username: Option<String>,
    pub age: Option<i64>,
    pub team_name: Option<String>,
}

impl MemberExample {
    /// True when no field constrains the query.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.age.is_none() && self.team_name.is_none()
    }
}
