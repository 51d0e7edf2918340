use crate::activities::{
    Activity, Campaign, ContentView, Event, Exception, Social, TimedEvent, Transaction,
    TransactionItem,
};
use crate::errors::AppError;

/// Ordered key/value pairs destined for one collection request. Keys are the
/// short codes the collection protocol defines; emission order is significant.
pub type ParameterPairs = Vec<(&'static str, String)>;

/// Converts activities into the key/value pairs that will form the collection
/// request for each one.
///
/// The mapper is stateful in exactly one field: the most recently mapped
/// transaction, which later transaction items borrow their order id and
/// currency from. One mapper instance belongs to one tracking session; callers
/// sharing an instance across threads must serialize access themselves.
#[derive(Debug, Default)]
pub struct ActivityParameterMapper {
    last_transaction: Option<Transaction>,
}

impl ActivityParameterMapper {
    pub fn new() -> Self {
        ActivityParameterMapper {
            last_transaction: None,
        }
    }

    /// Turn one activity into the ordered parameter pairs representing it.
    ///
    /// Mapping a `Transaction` records it as the last transaction. Mapping a
    /// `TransactionItem` before any transaction has been mapped fails with
    /// [`AppError::MissingTransactionContext`].
    pub fn map(&mut self, activity: &Activity) -> Result<ParameterPairs, AppError> {
        let pairs = match activity {
            Activity::AppView(view) => content_view_parameters("appview", view),
            Activity::ContentView(view) => content_view_parameters("pageview", view),
            Activity::Exception(exception) => exception_parameters(exception),
            Activity::Campaign(campaign) => campaign_parameters(campaign),
            Activity::Event(event) => event_parameters(event),
            Activity::TimedEvent(timed_event) => timed_event_parameters(timed_event),
            Activity::Social(social) => social_parameters(social),
            Activity::Transaction(transaction) => {
                self.last_transaction = Some(transaction.clone());
                transaction_parameters(transaction)
            }
            Activity::TransactionItem(item) => {
                let transaction = self
                    .last_transaction
                    .as_ref()
                    .ok_or(AppError::MissingTransactionContext)?;
                transaction_item_parameters(item, transaction)
            }
        };
        tracing::trace!("Mapped activity to {} parameter pairs", pairs.len());
        Ok(pairs)
    }
}

// App views and page views share every conditional field; only the leading
// type tag differs.
fn content_view_parameters(type_tag: &'static str, view: &ContentView) -> ParameterPairs {
    let mut pairs = vec![("t", type_tag.to_string())];
    push_if_not_empty(&mut pairs, "dl", &view.document_location);
    push_if_not_empty(&mut pairs, "dh", &view.document_host_name);
    push_if_not_empty(&mut pairs, "dp", &view.document_path);
    push_if_not_empty(&mut pairs, "dt", &view.document_title);
    push_if_not_empty(&mut pairs, "cd", &view.content_description);
    pairs
}

// Fatal is the collection protocol's default; exf is only sent to negate it.
fn exception_parameters(exception: &Exception) -> ParameterPairs {
    let mut pairs = vec![
        ("t", "exception".to_string()),
        ("exd", exception.description.clone()),
    ];
    if !exception.is_fatal {
        pairs.push(("exf", "0".to_string()));
    }
    pairs
}

// Campaigns carry no type tag of their own.
fn campaign_parameters(campaign: &Campaign) -> ParameterPairs {
    let mut pairs = Vec::new();
    push_if_not_empty(&mut pairs, "cn", &campaign.name);
    push_if_not_empty(&mut pairs, "cs", &campaign.source);
    push_if_not_empty(&mut pairs, "cm", &campaign.medium);
    push_if_not_empty(&mut pairs, "ck", &campaign.term);
    push_if_not_empty(&mut pairs, "cc", &campaign.content);
    pairs
}

fn event_parameters(event: &Event) -> ParameterPairs {
    let mut pairs = vec![("t", "event".to_string())];
    push_if_not_blank(&mut pairs, "ec", &event.category);
    push_if_not_blank(&mut pairs, "ea", &event.action);
    push_if_not_blank(&mut pairs, "el", &event.label);
    if let Some(value) = event.value {
        pairs.push(("ev", value.to_string()));
    }
    if event.non_interaction {
        pairs.push(("ni", "1".to_string()));
    }
    pairs
}

fn timed_event_parameters(timed_event: &TimedEvent) -> ParameterPairs {
    let mut pairs = vec![("t", "timing".to_string())];
    push_if_not_blank(&mut pairs, "utc", &timed_event.category);
    push_if_not_blank(&mut pairs, "utv", &timed_event.variable);
    push_if_not_blank(&mut pairs, "utl", &timed_event.label);
    // Whole milliseconds, no fraction, always the last pair.
    pairs.push(("utt", timed_event.time.as_millis().to_string()));
    pairs
}

fn social_parameters(social: &Social) -> ParameterPairs {
    vec![
        ("t", "social".to_string()),
        ("sn", social.network.clone()),
        ("sa", social.action.clone()),
        ("st", social.target.clone()),
    ]
}

fn transaction_parameters(transaction: &Transaction) -> ParameterPairs {
    let mut pairs = vec![
        ("t", "transaction".to_string()),
        ("ti", transaction.order_id.clone()),
    ];
    push_if_not_blank(&mut pairs, "ta", &transaction.store_name);
    push_if_nonzero(&mut pairs, "tr", transaction.order_total);
    push_if_nonzero(&mut pairs, "ts", transaction.shipping_cost);
    push_if_nonzero(&mut pairs, "tt", transaction.tax_cost);
    push_if_not_blank(&mut pairs, "cu", &transaction.currency);
    pairs
}

fn transaction_item_parameters(item: &TransactionItem, transaction: &Transaction) -> ParameterPairs {
    let mut pairs = vec![("t", "item".to_string()), ("ti", transaction.order_id.clone())];
    push_if_nonzero(&mut pairs, "ip", item.price);
    if item.quantity != 0 {
        pairs.push(("iq", item.quantity.to_string()));
    }
    push_if_not_blank(&mut pairs, "ic", &item.code);
    push_if_not_blank(&mut pairs, "in", &item.name);
    push_if_not_empty(&mut pairs, "iv", &item.variation);
    push_if_not_blank(&mut pairs, "cu", &transaction.currency);
    pairs
}

// Some protocol fields treat "" as absent, others also treat whitespace as
// absent. The distinction is per field and deliberate; see the call sites.
fn push_if_not_empty(pairs: &mut ParameterPairs, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            pairs.push((key, value.clone()));
        }
    }
}

fn push_if_not_blank(pairs: &mut ParameterPairs, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.trim().is_empty() {
            pairs.push((key, value.clone()));
        }
    }
}

fn push_if_nonzero(pairs: &mut ParameterPairs, key: &'static str, amount: f64) {
    if amount != 0.0 {
        pairs.push((key, format_currency(amount)));
    }
}

// Invariant formatting: '.' decimal point, exactly two fraction digits, no
// thousands separators.
fn format_currency(amount: f64) -> String {
    format!("{amount:.2}")
}
