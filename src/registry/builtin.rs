//! Built-in ontology tables.
//!
//! The static type-tag universe the registry is seeded with at process
//! start: entity types, relationship types and event types, plus the
//! protocol classification for commerce, payment and blockchain types.
//! Runtime registrations extend this table; nothing here is a closed
//! enum.

use super::registry::SchemaRegistry;
use super::types::TypeSchema;

/// Known entity type tags.
pub const ENTITY_TYPES: &[&str] = &[
    // Core (people as entities)
    "creator",
    "ai_clone",
    "audience_member",
    "organization",
    // Business agents
    "strategy_agent",
    "research_agent",
    "marketing_agent",
    "sales_agent",
    "service_agent",
    "design_agent",
    "engineering_agent",
    "finance_agent",
    "legal_agent",
    "intelligence_agent",
    // Content
    "blog_post",
    "video",
    "podcast",
    "social_post",
    "email",
    "course",
    "lesson",
    // Products
    "digital_product",
    "membership",
    "consultation",
    "nft",
    // Community
    "community",
    "conversation",
    "message",
    // Token
    "token",
    "token_contract",
    // Knowledge
    "knowledge_item",
    "embedding",
    // Platform
    "website",
    "landing_page",
    "template",
    "livestream",
    "recording",
    "media_asset",
    // Business
    "payment",
    "subscription",
    "invoice",
    "metric",
    "insight",
    "prediction",
    "report",
    // Auth session
    "session",
    "oauth_account",
    "verification_token",
    "password_reset_token",
    // UI preferences
    "ui_preferences",
    // Marketing
    "notification",
    "email_campaign",
    "announcement",
    "referral",
    "campaign",
    "lead",
    // External
    "external_agent",
    "external_workflow",
    "external_connection",
    // Protocol
    "mandate",
    "product",
    // Workflow
    "idea",
    "plan",
    "feature",
    "test",
    "design",
    "task",
];

/// Known relationship type tags.
pub const RELATIONSHIP_TYPES: &[&str] = &[
    // Ownership
    "owns",
    "created_by",
    // AI relationships
    "clone_of",
    "trained_on",
    "powers",
    // Content relationships
    "authored",
    "generated_by",
    "published_to",
    "part_of",
    "references",
    // Community relationships
    "member_of",
    "following",
    "moderates",
    "participated_in",
    // Product relationships
    "holds_tokens",
    "enrolled_in",
    "purchased",
    "subscribed_to",
    // Learning relationships
    "completed",
    "taught_by",
    "mentored_by",
];

/// Known event type tags.
pub const EVENT_TYPES: &[&str] = &[
    // Entity events
    "thing_created",
    "thing_updated",
    "thing_deleted",
    "thing_published",
    "thing_archived",
    // Relationship events
    "connection_created",
    "connection_updated",
    "connection_deleted",
    // Knowledge events
    "knowledge_created",
    "knowledge_updated",
    "knowledge_deleted",
    "knowledge_embedded",
    // Content events
    "content_published",
    "content_viewed",
    "content_liked",
    "content_commented",
    // Community events
    "user_joined",
    "user_invited",
    "message_sent",
    "conversation_started",
    // Token events
    "tokens_minted",
    "tokens_burned",
    "tokens_transferred",
    "tokens_purchased",
    // Commerce events
    "payment_initiated",
    "payment_completed",
    "payment_failed",
    "subscription_created",
    "subscription_renewed",
    "subscription_cancelled",
    "purchase_completed",
    // Learning events
    "lesson_started",
    "lesson_completed",
    "course_enrolled",
    "course_completed",
    // AI events
    "clone_interacted",
    "ai_generated",
    "embedding_created",
    // Task events
    "task_created",
    "task_started",
    "task_completed",
    "task_failed",
    // Agent events
    "agent_started",
    "agent_completed",
    "agent_failed",
    "agent_executed",
    // Cycle events
    "cycle_started",
    "cycle_completed",
    "cycle_validated",
    "cycle_skipped",
    // Blockchain events, consolidated families carrying metadata.protocol
    "transaction_sent",
    "transaction_confirmed",
    "transaction_failed",
    "block_created",
    "contract_deployed",
    "contract_called",
    "token_minted",
    "token_burned",
    "token_transferred",
    "proposal_created",
    "proposal_voted",
    "proposal_executed",
    "delegation_created",
    "delegation_revoked",
    // System events
    "hook_executed",
    "insight_generated",
    "prediction_made",
    "metric_calculated",
];

const PAYMENT_TYPES: &[&str] = &[
    "payment",
    "mandate",
    "payment_initiated",
    "payment_completed",
    "payment_failed",
];

const COMMERCE_TYPES: &[&str] = &[
    "digital_product",
    "membership",
    "consultation",
    "subscription",
    "invoice",
    "product",
    "subscription_created",
    "subscription_renewed",
    "subscription_cancelled",
    "purchase_completed",
];

const BLOCKCHAIN_TYPES: &[&str] = &["token", "token_contract", "nft"];

/// Consolidated blockchain event families. The chain they belong to is
/// carried in `metadata.protocol`, so that key is required.
const BLOCKCHAIN_EVENT_TYPES: &[&str] = &[
    "transaction_sent",
    "transaction_confirmed",
    "transaction_failed",
    "block_created",
    "contract_deployed",
    "contract_called",
    "token_minted",
    "token_burned",
    "token_transferred",
    "proposal_created",
    "proposal_voted",
    "proposal_executed",
    "delegation_created",
    "delegation_revoked",
];

fn protocol_for(tag: &str) -> Option<&'static str> {
    if PAYMENT_TYPES.contains(&tag) {
        Some("payment")
    } else if COMMERCE_TYPES.contains(&tag) {
        Some("commerce")
    } else if BLOCKCHAIN_TYPES.contains(&tag) || BLOCKCHAIN_EVENT_TYPES.contains(&tag) {
        Some("blockchain")
    } else {
        None
    }
}

fn schema_for(tag: &str) -> TypeSchema {
    let mut schema = TypeSchema::new(tag);
    if let Some(protocol) = protocol_for(tag) {
        schema = schema.protocol(protocol);
    }
    if BLOCKCHAIN_EVENT_TYPES.contains(&tag) {
        schema = schema.required(&["protocol"]);
    }
    schema
}

/// Install the built-in tables into a registry.
///
/// Idempotent: a tag that is already registered keeps its existing rule.
pub fn install(registry: &SchemaRegistry) {
    for tag in ENTITY_TYPES
        .iter()
        .chain(RELATIONSHIP_TYPES)
        .chain(EVENT_TYPES)
        .copied()
    {
        let _ = registry.register(schema_for(tag));
    }
}
