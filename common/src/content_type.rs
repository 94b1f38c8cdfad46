//! Registry of the content types reachable from the discovery tree.

use serde::{Deserialize, Serialize};

/// Every content type the discovery tree can search.
///
/// The declaration order is the order in which per-type searches run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    News,
    Projects,
    Proposals,
    Requests,
    Partners,
    Events,
    Communities,
    Sponsors,
    Users,
    Tools,
    InfoResources,
}

impl ContentType {
    pub const ALL: [ContentType; 11] = [
        ContentType::News,
        ContentType::Projects,
        ContentType::Proposals,
        ContentType::Requests,
        ContentType::Partners,
        ContentType::Events,
        ContentType::Communities,
        ContentType::Sponsors,
        ContentType::Users,
        ContentType::Tools,
        ContentType::InfoResources,
    ];

    /// Name used by facet values and the node type registry.
    pub fn name(self) -> &'static str {
        match self {
            ContentType::News => "News",
            ContentType::Projects => "Projects",
            ContentType::Proposals => "Proposals",
            ContentType::Requests => "Requests",
            ContentType::Partners => "Partners",
            ContentType::Events => "Events",
            ContentType::Communities => "Communities",
            ContentType::Sponsors => "Sponsors",
            ContentType::Users => "Users",
            ContentType::Tools => "Tools",
            ContentType::InfoResources => "InfoResources",
        }
    }

    /// Facet group id which, when present in the selected filters, marks this type as selected.
    pub fn facet_group_id(self) -> u32 {
        match self {
            ContentType::News => 1,
            ContentType::Projects => 2,
            ContentType::Proposals => 3,
            ContentType::Requests => 4,
            ContentType::Partners => 5,
            ContentType::Events => 6,
            ContentType::Communities => 7,
            ContentType::Sponsors => 8,
            ContentType::Users => 9,
            ContentType::Tools => 10,
            ContentType::InfoResources => 11,
        }
    }

    pub fn index_name(self) -> &'static str {
        match self {
            ContentType::News => "news",
            ContentType::Projects => "projects",
            ContentType::Proposals => "proposals",
            ContentType::Requests => "requests",
            ContentType::Partners => "partners",
            ContentType::Events => "events",
            ContentType::Communities => "communities",
            ContentType::Sponsors => "sponsors",
            ContentType::Users => "users",
            ContentType::Tools => "tools",
            ContentType::InfoResources => "info-resources",
        }
    }

    /// Case-insensitive lookup by registry name.
    pub fn from_name(name: &str) -> Option<ContentType> {
        ContentType::ALL.into_iter().find(|ty| ty.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn from_facet_group_id(id: u32) -> Option<ContentType> {
        ContentType::ALL.into_iter().find(|ty| ty.facet_group_id() == id)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
