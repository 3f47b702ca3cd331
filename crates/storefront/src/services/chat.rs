//! Scripted chat assistant.
//!
//! Replies come from an ordered list of keyword rules; the first rule with a
//! matching keyword wins. Keywords match whole words or phrases in the
//! lower-cased message, so "hi" does not fire on "shipping". Messages that
//! match nothing get one of five generic replies.

use rand::Rng;
use rand::seq::IndexedRandom;

/// One keyword set and the reply it triggers.
#[derive(Debug, Clone)]
pub struct ChatRule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

impl ChatRule {
    #[must_use]
    pub const fn new(keywords: &'static [&'static str], reply: &'static str) -> Self {
        Self { keywords, reply }
    }

    fn matches(&self, message: &str) -> bool {
        self.keywords.iter().any(|kw| contains_term(message, kw))
    }
}

const RULES: &[ChatRule] = &[
    ChatRule::new(
        &[
            "track",
            "tracking",
            "tracked",
            "orders",
            "my order",
            "order status",
        ],
        "You can follow your order from the Orders page of your account. Tracking numbers are emailed as soon as a parcel ships.",
    ),
    ChatRule::new(
        &["shipping", "shipped", "ships", "ship", "delivery", "deliveries", "deliver", "delivered"],
        "Standard shipping takes 3-5 business days and is free on orders over $50. Express delivery arrives in 1-2 business days.",
    ),
    ChatRule::new(
        &["return", "returns", "returned", "returning", "refund", "refunds", "refunded", "exchange", "exchanges"],
        "Unworn items can be returned within 30 days for a full refund. Start a return from your order history.",
    ),
    ChatRule::new(
        &["payment", "payments", "pay", "paid", "credit card", "paypal", "checkout"],
        "We accept all major credit cards and PayPal. Payments are processed securely at checkout.",
    ),
    ChatRule::new(
        &["discount", "discounts", "coupon", "coupons", "promo", "promos", "sale", "sales", "deal", "deals"],
        "Check the Sale section for current markdowns. Sign up for our newsletter to get 10% off your first order.",
    ),
    ChatRule::new(
        &["size", "sizes", "sizing", "fit"],
        "Every product page has a size guide. If you are between sizes we recommend going one size up.",
    ),
    ChatRule::new(
        &["recommend", "recommendation", "recommendations", "suggest", "suggestion", "suggestions", "looking for"],
        "Have a look at the recommendations on the home page; they are picked from what you have browsed and saved.",
    ),
    ChatRule::new(
        &["human", "agent", "support", "contact", "email", "phone"],
        "You can reach our support team at support@shopfront.example or by phone Monday to Friday, 9am-6pm.",
    ),
    ChatRule::new(
        &["thanks", "thank you", "thx"],
        "You're welcome! Is there anything else I can help you with?",
    ),
    ChatRule::new(
        &["hello", "hi", "hey", "good morning", "good evening"],
        "Hello! How can I help you with your shopping today?",
    ),
    ChatRule::new(
        &["bye", "goodbye", "see you"],
        "Goodbye! Happy shopping.",
    ),
];

const FALLBACKS: [&str; 5] = [
    "I'm not sure I understood that. Could you rephrase your question?",
    "Could you give me a bit more detail about what you are looking for?",
    "I can help with orders, shipping, returns, payments and sizing. What would you like to know?",
    "Sorry, I don't have an answer for that yet. Try asking about shipping or returns.",
    "Let me point you in the right direction: ask me about an order, a delivery or a product.",
];

/// Stateless rule-based responder.
#[derive(Debug, Clone)]
pub struct ChatResponder {
    rules: &'static [ChatRule],
}

impl Default for ChatResponder {
    fn default() -> Self {
        Self { rules: RULES }
    }
}

impl ChatResponder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply using the thread-local RNG for fallbacks.
    #[must_use]
    pub fn reply(&self, message: &str) -> String {
        self.reply_with(message, &mut rand::rng())
    }

    /// Reply drawing fallbacks from `rng`.
    pub fn reply_with<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> String {
        let message = message.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&message))
            .map_or_else(
                || FALLBACKS.choose(rng).copied().unwrap_or(FALLBACKS[0]),
                |rule| rule.reply,
            )
            .to_string()
    }

    /// The generic replies used when no rule matches.
    #[must_use]
    pub const fn fallbacks() -> &'static [&'static str] {
        &FALLBACKS
    }
}

/// Whether `term` occurs in `haystack` delimited by non-alphanumeric
/// characters (or the string boundaries).
fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before = haystack.get(..start).and_then(|s| s.chars().next_back());
        let after = haystack.get(end..).and_then(|s| s.chars().next());
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
