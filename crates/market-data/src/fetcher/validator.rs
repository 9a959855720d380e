//! Options-chain row validation.
//!
//! Checks each standardized row before it is handed to the host:
//! - Strike is positive and the contract symbol is set
//! - Prices are non-negative
//! - High >= Low
//! - Bid <= Ask (warning only; crossed markets do happen intraday)

use log::warn;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::OptionsChainData;

/// Validation severity levels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationSeverity {
    /// Hard failure - reject the row and the whole fetch.
    Hard,
    /// Soft warning - accept the row but log a warning.
    Soft,
}

/// One finding against a row.
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    pub severity: ValidationSeverity,
    pub message: String,
}

/// Row validator configuration.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Whether to reject rows with negative prices.
    pub reject_negative_prices: bool,
    /// Whether to reject rows where high < low.
    pub reject_invalid_range: bool,
    /// Whether to warn when the bid is above the ask.
    pub warn_on_crossed_market: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            reject_negative_prices: true,
            reject_invalid_range: true,
            warn_on_crossed_market: true,
        }
    }
}

/// Options-chain row validator.
#[derive(Default)]
pub struct ChainRowValidator {
    config: ValidatorConfig,
}

impl ChainRowValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a row.
    ///
    /// Hard issues are joined into one [`MarketDataError::ValidationFailed`];
    /// soft issues are logged.
    pub fn validate(&self, row: &OptionsChainData) -> Result<(), MarketDataError> {
        let issues = self.issues(row);

        let errors: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Hard)
            .map(|i| i.message.as_str())
            .collect();

        if !errors.is_empty() {
            return Err(MarketDataError::ValidationFailed {
                message: format!("{}: {}", row.contract_symbol, errors.join("; ")),
            });
        }

        for issue in issues.iter().filter(|i| i.severity == ValidationSeverity::Soft) {
            warn!(
                "Chain validation warning for {}: {}",
                row.contract_symbol, issue.message
            );
        }

        Ok(())
    }

    /// Every issue found on `row`, hard and soft.
    pub fn issues(&self, row: &OptionsChainData) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        self.validate_identity(row, &mut issues);
        self.validate_prices(row, &mut issues);
        self.validate_range(row, &mut issues);
        self.validate_market(row, &mut issues);
        issues
    }

    fn validate_identity(&self, row: &OptionsChainData, issues: &mut Vec<ValidationIssue>) {
        if row.strike <= Decimal::ZERO {
            issues.push(hard(format!("Non-positive strike: {}", row.strike)));
        }
        if row.contract_symbol.trim().is_empty() {
            issues.push(hard("Missing contract symbol"));
        }
    }

    fn validate_prices(&self, row: &OptionsChainData, issues: &mut Vec<ValidationIssue>) {
        if !self.config.reject_negative_prices {
            return;
        }

        let prices = [
            ("close", row.close),
            ("bid", row.close_bid),
            ("ask", row.close_ask),
            ("prev_close", row.prev_close),
            ("open", row.open),
            ("high", row.high),
            ("low", row.low),
            ("settlement", row.settlement_price),
        ];
        for (name, price) in prices {
            if let Some(price) = price.filter(|p| *p < Decimal::ZERO) {
                issues.push(hard(format!("Negative {} price: {}", name, price)));
            }
        }

        for (name, count) in [("volume", row.volume), ("open interest", row.open_interest)] {
            if let Some(count) = count.filter(|c| *c < 0) {
                issues.push(hard(format!("Negative {}: {}", name, count)));
            }
        }
    }

    fn validate_range(&self, row: &OptionsChainData, issues: &mut Vec<ValidationIssue>) {
        if let (true, Some(high), Some(low)) = (self.config.reject_invalid_range, row.high, row.low)
        {
            if high < low {
                issues.push(hard(format!("High ({}) is less than Low ({})", high, low)));
            }
        }
    }

    fn validate_market(&self, row: &OptionsChainData, issues: &mut Vec<ValidationIssue>) {
        if let (true, Some(bid), Some(ask)) =
            (self.config.warn_on_crossed_market, row.close_bid, row.close_ask)
        {
            if bid > ask {
                issues.push(ValidationIssue {
                    severity: ValidationSeverity::Soft,
                    message: format!("Crossed market: bid {} > ask {}", bid, ask),
                });
            }
        }
    }
}

fn hard(message: impl Into<String>) -> ValidationIssue {
    ValidationIssue {
        severity: ValidationSeverity::Hard,
        message: message.into(),
    }
}
