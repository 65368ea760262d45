use common::Decision;

use crate::indicators::IndicatorSnapshot;

/// Score at or above which the decision is BUY.
pub const BUY_THRESHOLD: i32 = 3;
/// Score at or below which the decision is SELL.
pub const SELL_THRESHOLD: i32 = -3;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// The close must clear a band by this margin to count as a breakout.
pub const BREAKOUT_MARGIN: f64 = 0.005;

/// Decision plus the reasons and the score that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    pub decision: Decision,
    pub reasons: Vec<&'static str>,
    pub score: i32,
}

struct Rule {
    weight: i32,
    reason: &'static str,
    fires: fn(f64, &IndicatorSnapshot) -> bool,
}

// Evaluation order is the order reasons appear in messages.
const RULES: [Rule; 8] = [
    Rule {
        weight: 2,
        reason: "RSI oversold (<30)",
        fires: |_, s| s.rsi < RSI_OVERSOLD,
    },
    Rule {
        weight: -2,
        reason: "RSI overbought (>70)",
        fires: |_, s| s.rsi > RSI_OVERBOUGHT,
    },
    Rule {
        weight: 2,
        reason: "MACD bullish cross",
        fires: |_, s| s.macd.cross_up,
    },
    Rule {
        weight: -2,
        reason: "MACD bearish cross",
        fires: |_, s| s.macd.cross_down,
    },
    Rule {
        weight: 1,
        reason: "Breakout above upper Bollinger band (momentum)",
        fires: |price, s| {
            s.bollinger
                .is_some_and(|b| price > b.upper * (1.0 + BREAKOUT_MARGIN))
        },
    },
    Rule {
        weight: -1,
        reason: "Breakdown below lower Bollinger band (weakness)",
        fires: |price, s| {
            s.bollinger
                .is_some_and(|b| price < b.lower * (1.0 - BREAKOUT_MARGIN))
        },
    },
    Rule {
        weight: 1,
        reason: "Short-term uptrend",
        fires: |_, s| s.slope > 0.0,
    },
    Rule {
        weight: -1,
        reason: "Short-term downtrend",
        fires: |_, s| s.slope < 0.0,
    },
];

/// Sum every firing rule's weight and map the total onto a decision.
/// Rules are independent; a HOLD can still carry reasons.
pub fn score(last_price: f64, snapshot: &IndicatorSnapshot) -> Scorecard {
    let (score, reasons) = RULES
        .iter()
        .filter(|rule| (rule.fires)(last_price, snapshot))
        .fold((0, Vec::new()), |(score, mut reasons), rule| {
            reasons.push(rule.reason);
            (score + rule.weight, reasons)
        });

    Scorecard {
        decision: decide(score),
        reasons,
        score,
    }
}

pub fn decide(score: i32) -> Decision {
    if score >= BUY_THRESHOLD {
        Decision::Buy
    } else if score <= SELL_THRESHOLD {
        Decision::Sell
    } else {
        Decision::Hold
    }
}
