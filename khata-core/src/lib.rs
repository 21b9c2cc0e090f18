//! khata-core: canonical schema and pure text normalizers for credit-card
//! statement parsing.

pub mod amounts;
pub mod dates;
pub mod fields;
pub mod last4;
pub mod text;

pub use amounts::{rupee_amount, rupee_amount_axis, rupee_amount_hdfc};
pub use dates::{normalize_date, normalize_date_axis, normalize_date_hdfc, normalize_date_icici};
pub use fields::{BankIdentity, StatementFields, TransactionRecord, TxnDirection};
pub use last4::find_last4;
