//! Diesel table definitions for the mirror schema.
//!
//! Timestamp columns hold wall-clock values the reader has already converted
//! to the display timezone; the mirror stores exactly what reporting queries
//! display.

diesel::table! {
    /// Merged pull requests, one immutable row per remote id.
    pull_requests (id) {
        /// Remote-assigned identifier, the dedup key.
        id -> BigInt,
        /// Short repository name as reported by the API.
        repository -> Text,
        /// Repository-local pull request number.
        number -> Integer,
        /// Pull request title.
        title -> Text,
        /// Assignee login, null when nobody was assigned.
        assignee -> Nullable<Text>,
        /// Ref name the pull request targeted.
        target_branch -> Text,
        /// Ref name the pull request came from.
        source_branch -> Text,
        /// First commit author date in the display timezone.
        first_commit_at -> Nullable<Timestamp>,
        /// Merge instant in the display timezone.
        merged_at -> Timestamp,
        /// Count of commits on the pull request.
        num_commits -> Integer,
    }
}

diesel::table! {
    /// Non-assignee review comments on mirrored pull requests.
    comments (comment_id) {
        /// Remote-assigned comment identifier.
        comment_id -> BigInt,
        /// Pull request assignee at fetch time, denormalised.
        assignee -> Nullable<Text>,
        /// Comment author login.
        commenter -> Text,
        /// Raw comment text.
        body -> Text,
        /// Creation instant in the display timezone.
        created_at -> Timestamp,
        /// Owning pull request id.
        pull_id -> BigInt,
    }
}

diesel::joinable!(comments -> pull_requests (pull_id));

diesel::allow_tables_to_appear_in_same_query!(comments, pull_requests);
