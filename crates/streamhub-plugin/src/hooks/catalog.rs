//! The hook catalog: the closed set of extension points the client exposes.
//!
//! Plugins register handlers against these names only; anything outside the
//! catalog is unknown and never reaches the registry. Each name is either an
//! *action* hook (side effect only, the threaded value is untouched) or a
//! *filter* hook (each handler transforms and returns the value).

use std::fmt;
use std::str::FromStr;

/// Whether a hook threads a value through its handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Side-effect hook; handler return values are ignored.
    Action,
    /// Value-transforming hook; each handler's return value feeds the next.
    Filter,
}

/// Enumeration of all hook names recognized by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookName {
    // ── Actions ──
    /// Fired once when the client application boots.
    /// Params: `{ "client_version": string }`.
    ApplicationInit,
    /// Fired when a watch page has loaded its video.
    /// Params: `{ "video_id": string }`.
    VideoWatch,
    /// Fired when the video player has finished initializing.
    /// Params: `{ "video_id": string }`.
    VideoPlayerLoaded,
    /// Fired when the video edit form opens.
    VideoEditInit,
    /// Fired when the login page initializes.
    LoginInit,
    /// Fired when the search page initializes.
    SearchInit,
    /// Fired when a video's comment threads have loaded.
    /// Params: `{ "video_id": string, "comment_count": number }`.
    CommentsLoaded,
    /// Fired when the admin plugin settings page initializes.
    AdminPluginSettingsInit,

    // ── Filters ──
    /// Transforms the query used to fetch video listings.
    /// Value: a video list query object. Params: `{ "page": string }`.
    VideoListParams,
    /// Transforms the fetched video listing before display.
    VideoListResult,
    /// Transforms a single fetched video before the watch page renders it.
    VideoGetResult,
    /// Transforms the query used to fetch a video's comment threads.
    CommentListParams,
    /// Transforms fetched comment threads before display.
    CommentListResult,
    /// Transforms the query sent to the search endpoint.
    SearchParams,
    /// Transforms search results before display.
    SearchResult,
    /// Transforms the options used to build the video player.
    /// Value: a player options object. Params: `{ "video_id": string }`.
    PlayerOptions,
    /// Transforms the entries of the left menu.
    MenuLinks,
    /// Transforms the payload of the signup form before submission.
    SignupParams,
    /// Transforms raw SVG icon content before injection.
    SvgIconContent,
}

impl HookName {
    /// Every recognized hook name, in catalog order.
    pub const ALL: [HookName; 19] = [
        Self::ApplicationInit,
        Self::VideoWatch,
        Self::VideoPlayerLoaded,
        Self::VideoEditInit,
        Self::LoginInit,
        Self::SearchInit,
        Self::CommentsLoaded,
        Self::AdminPluginSettingsInit,
        Self::VideoListParams,
        Self::VideoListResult,
        Self::VideoGetResult,
        Self::CommentListParams,
        Self::CommentListResult,
        Self::SearchParams,
        Self::SearchResult,
        Self::PlayerOptions,
        Self::MenuLinks,
        Self::SignupParams,
        Self::SvgIconContent,
    ];

    /// Returns the string name of this hook.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationInit => "action:application-init",
            Self::VideoWatch => "action:video-watch",
            Self::VideoPlayerLoaded => "action:video-player-loaded",
            Self::VideoEditInit => "action:video-edit-init",
            Self::LoginInit => "action:login-init",
            Self::SearchInit => "action:search-init",
            Self::CommentsLoaded => "action:comments-loaded",
            Self::AdminPluginSettingsInit => "action:admin-plugin-settings-init",
            Self::VideoListParams => "filter:video-list-params",
            Self::VideoListResult => "filter:video-list-result",
            Self::VideoGetResult => "filter:video-get-result",
            Self::CommentListParams => "filter:comment-list-params",
            Self::CommentListResult => "filter:comment-list-result",
            Self::SearchParams => "filter:search-params",
            Self::SearchResult => "filter:search-result",
            Self::PlayerOptions => "filter:player-options",
            Self::MenuLinks => "filter:menu-links",
            Self::SignupParams => "filter:signup-params",
            Self::SvgIconContent => "filter:svg-icon-content",
        }
    }

    /// Resolves a hook name string against the catalog.
    ///
    /// Returns `None` for any name outside the closed set.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|hook| hook.as_str() == name)
    }

    /// Returns whether this hook is an action or a filter.
    pub fn kind(&self) -> HookKind {
        match self {
            Self::ApplicationInit
            | Self::VideoWatch
            | Self::VideoPlayerLoaded
            | Self::VideoEditInit
            | Self::LoginInit
            | Self::SearchInit
            | Self::CommentsLoaded
            | Self::AdminPluginSettingsInit => HookKind::Action,
            Self::VideoListParams
            | Self::VideoListResult
            | Self::VideoGetResult
            | Self::CommentListParams
            | Self::CommentListResult
            | Self::SearchParams
            | Self::SearchResult
            | Self::PlayerOptions
            | Self::MenuLinks
            | Self::SignupParams
            | Self::SvgIconContent => HookKind::Filter,
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HookName {
    type Err = UnknownHookName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownHookName(s.to_string()))
    }
}

/// Error returned when parsing a name outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hook name '{0}'")]
pub struct UnknownHookName(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_names() {
        for hook in HookName::ALL {
            assert_eq!(HookName::from_name(hook.as_str()), Some(hook));
        }
    }

    #[test]
    fn test_kind_matches_name_prefix() {
        for hook in HookName::ALL {
            match hook.kind() {
                HookKind::Action => assert!(hook.as_str().starts_with("action:")),
                HookKind::Filter => assert!(hook.as_str().starts_with("filter:")),
            }
        }
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert_eq!(HookName::from_name("filter:video-licence"), None);
        assert_eq!(HookName::from_name("action:video-watch "), None);
        assert_eq!(HookName::from_name(""), None);

        let err = "filter:nope".parse::<HookName>().unwrap_err();
        assert_eq!(err, UnknownHookName("filter:nope".to_string()));
    }

    #[test]
    fn test_scenario_names_are_in_catalog() {
        assert_eq!(
            HookName::from_name("action:video-watch"),
            Some(HookName::VideoWatch)
        );
        assert_eq!(
            HookName::from_name("filter:video-list-params"),
            Some(HookName::VideoListParams)
        );
    }
}
