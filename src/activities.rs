use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One discrete trackable occurrence in the host application. The set of
/// kinds is closed; the parameter mapper matches on it exhaustively.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Activity {
    AppView(ContentView),
    ContentView(ContentView),
    Exception(Exception),
    Campaign(Campaign),
    Event(Event),
    TimedEvent(TimedEvent),
    Social(Social),
    Transaction(Transaction),
    TransactionItem(TransactionItem),
}

/// Fields shared by app views and page views. An `Activity::AppView` carries
/// the same fields but is reported under a different type tag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ContentView {
    pub document_location: Option<String>,
    pub document_host_name: Option<String>,
    pub document_path: Option<String>,
    pub document_title: Option<String>,
    pub content_description: Option<String>,
}

impl ContentView {
    pub fn with_location(document_location: impl Into<String>) -> Self {
        ContentView {
            document_location: Some(document_location.into()),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exception {
    pub description: String,
    pub is_fatal: bool,
}

impl Exception {
    pub fn new(description: impl Into<String>, is_fatal: bool) -> Self {
        Exception {
            description: description.into(),
            is_fatal,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Campaign {
    pub name: Option<String>,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub term: Option<String>,
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Event {
    pub category: Option<String>,
    pub action: Option<String>,
    pub label: Option<String>,
    pub value: Option<i64>,
    pub non_interaction: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimedEvent {
    pub category: Option<String>,
    pub variable: Option<String>,
    pub label: Option<String>,
    pub time: Duration,
}

impl TimedEvent {
    pub fn new(time: Duration) -> Self {
        TimedEvent {
            category: None,
            variable: None,
            label: None,
            time,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Social {
    pub network: String,
    pub action: String,
    pub target: String,
}

impl Social {
    pub fn new(
        network: impl Into<String>,
        action: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Social {
            network: network.into(),
            action: action.into(),
            target: target.into(),
        }
    }
}

/// An e-commerce order. Monetary amounts default to zero and are omitted from
/// the mapped parameters while zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub order_id: String,
    pub store_name: Option<String>,
    pub order_total: f64,
    pub shipping_cost: f64,
    pub tax_cost: f64,
    pub currency: Option<String>,
}

impl Transaction {
    pub fn new(order_id: impl Into<String>) -> Self {
        Transaction {
            order_id: order_id.into(),
            store_name: None,
            order_total: 0.0,
            shipping_cost: 0.0,
            tax_cost: 0.0,
            currency: None,
        }
    }
}

/// A line item belonging to the most recently tracked [`Transaction`]. Items
/// carry no order id or currency of their own; the mapper borrows both from
/// the last transaction it saw.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TransactionItem {
    pub price: f64,
    pub quantity: i64,
    pub code: Option<String>,
    pub name: Option<String>,
    pub variation: Option<String>,
}
