/**
* filename : trade
* author : HAMA
* date: 2025. 6. 2.
* description: 저널 거래 기록 모델
**/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::utils::{parse_timestamp, timestamp_to_datetime};

/// 체크리스트 평가 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "Not A+")]
    NotAPlus,
}

impl Verdict {
    /// 저장 시점의 판정 계산
    ///
    /// 중요도 높은 조건이 모두 충족되고 점수 비율이 기준 이상일 때만 A+.
    pub fn derive(score: u32, possible: u32, high_importance_complete: bool, threshold: f64) -> Self {
        if possible == 0 || !high_importance_complete {
            return Verdict::NotAPlus;
        }

        let percent = score as f64 / possible as f64 * 100.0;
        if percent >= threshold {
            Verdict::APlus
        } else {
            Verdict::NotAPlus
        }
    }

    pub fn is_a_plus(&self) -> bool {
        matches!(self, Verdict::APlus)
    }
}

/// 거래 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Win,
    Loss,
    Breakeven,
}

/// 저널에 기록된 거래 한 건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: i64,
    pub strategy_name: String,
    pub score: u32,
    pub possible: u32,
    pub verdict: Verdict,
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TradeOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_reward_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
}

impl TradeRecord {
    pub fn new(
        id: i64,
        strategy_name: impl Into<String>,
        score: u32,
        possible: u32,
        verdict: Verdict,
        timestamp: DateTime<Utc>,
    ) -> Self {
        TradeRecord {
            id,
            strategy_name: strategy_name.into(),
            score,
            possible,
            verdict,
            timestamp,
            pnl: None,
            outcome: None,
            risk_amount: None,
            risk_reward_ratio: None,
            tags: Vec::new(),
            pair: None,
            session: None,
            setup: None,
        }
    }

    /// 거래 후 손익 기록
    pub fn with_pnl(mut self, pnl: f64) -> Self {
        self.pnl = Some(pnl);
        self
    }

    pub fn with_outcome(mut self, outcome: TradeOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// 손익과 결과를 함께 기록 (부호로 결과 결정)
    pub fn with_result(self, pnl: f64) -> Self {
        let outcome = if pnl > 0.0 {
            TradeOutcome::Win
        } else if pnl < 0.0 {
            TradeOutcome::Loss
        } else {
            TradeOutcome::Breakeven
        };
        self.with_pnl(pnl).with_outcome(outcome)
    }

    pub fn with_risk(mut self, risk_amount: f64) -> Self {
        self.risk_amount = Some(risk_amount);
        self
    }

    pub fn with_risk_reward(mut self, ratio: f64) -> Self {
        self.risk_reward_ratio = Some(ratio);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = Some(setup.into());
        self
    }

    /// 손익이 기록된 거래인지
    pub fn is_priced(&self) -> bool {
        self.pnl.is_some()
    }

    pub fn is_a_plus(&self) -> bool {
        self.verdict.is_a_plus()
    }

    /// 체크리스트 달성률 (%)
    pub fn score_percent(&self) -> f64 {
        if self.possible == 0 {
            return 0.0;
        }
        self.score as f64 / self.possible as f64 * 100.0
    }

    /// id(생성 시각 밀리초)로부터 생성 시각 계산
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.id)
    }

    /// 수집 단계 검증
    ///
    /// 분석 함수는 검증 없이도 동작하지만, 저장된 데이터를 읽어들일 때는
    /// 결과와 손익 부호가 어긋나는 기록을 거부한다.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.strategy_name.trim().is_empty() {
            return Err(AnalyticsError::invalid_trade(self.id, "strategy name is empty"));
        }
        if self.score > self.possible {
            return Err(AnalyticsError::invalid_trade(
                self.id,
                format!("score {} exceeds possible {}", self.score, self.possible),
            ));
        }
        if let Some(pnl) = self.pnl {
            if !pnl.is_finite() {
                return Err(AnalyticsError::invalid_trade(self.id, "pnl is not finite"));
            }
            match self.outcome {
                Some(TradeOutcome::Win) if pnl <= 0.0 => {
                    return Err(AnalyticsError::invalid_trade(
                        self.id,
                        format!("outcome 'win' with pnl {}", pnl),
                    ));
                }
                Some(TradeOutcome::Loss) if pnl >= 0.0 => {
                    return Err(AnalyticsError::invalid_trade(
                        self.id,
                        format!("outcome 'loss' with pnl {}", pnl),
                    ));
                }
                _ => {}
            }
        }
        if let Some(risk) = self.risk_amount {
            if !risk.is_finite() || risk < 0.0 {
                return Err(AnalyticsError::invalid_trade(
                    self.id,
                    format!("risk amount must be non-negative, got {}", risk),
                ));
            }
        }
        if let Some(ratio) = self.risk_reward_ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(AnalyticsError::invalid_trade(
                    self.id,
                    format!("risk/reward ratio must be positive, got {}", ratio),
                ));
            }
        }
        Ok(())
    }
}

/// JSON 배열로 저장된 거래 목록을 읽고 검증
pub fn parse_trades_json(json: &str) -> Result<Vec<TradeRecord>, AnalyticsError> {
    let trades: Vec<TradeRecord> = serde_json::from_str(json)?;

    for trade in &trades {
        if let Err(e) = trade.validate() {
            log::warn!("거래 기록 거부: {}", e);
            return Err(e);
        }
    }

    log::debug!("거래 {}건 로드 완료", trades.len());
    Ok(trades)
}

/// 저널 타임스탬프 직렬화 형식
pub mod timestamp_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
