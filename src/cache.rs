/**
* filename : cache
* author : HAMA
* date: 2025. 6. 5.
* description: 분석 결과 메모이제이션
**/

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::models::trade::TradeRecord;

/// 입력 거래 목록의 지문
///
/// 거래 수, 첫/마지막 타임스탬프, 손익 기록 수와 함께
/// 분석에 쓰이는 모든 필드의 해시를 담는다. 결과, 판정, 점수, 위험 금액만
/// 바뀌어도 지문이 달라진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputFingerprint {
    pub count: usize,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
    pub priced: usize,
    content: u64,
    starting_balance_bits: u64,
}

impl InputFingerprint {
    pub fn of(trades: &[TradeRecord], starting_balance: f64) -> Self {
        let first = trades.iter().map(|t| t.timestamp).min();
        let last = trades.iter().map(|t| t.timestamp).max();
        let priced = trades.iter().filter(|t| t.is_priced()).count();

        let mut hasher = DefaultHasher::new();
        for trade in trades {
            hash_trade(trade, &mut hasher);
        }

        InputFingerprint {
            count: trades.len(),
            first,
            last,
            priced,
            content: hasher.finish(),
            starting_balance_bits: starting_balance.to_bits(),
        }
    }
}

fn hash_trade<H: Hasher>(trade: &TradeRecord, state: &mut H) {
    trade.id.hash(state);
    trade.strategy_name.hash(state);
    trade.score.hash(state);
    trade.possible.hash(state);
    trade.verdict.hash(state);
    trade.timestamp.hash(state);
    trade.pnl.map(f64::to_bits).hash(state);
    trade.outcome.hash(state);
    trade.risk_amount.map(f64::to_bits).hash(state);
    trade.risk_reward_ratio.map(f64::to_bits).hash(state);
    trade.tags.hash(state);
    trade.pair.hash(state);
    trade.session.hash(state);
    trade.setup.hash(state);
}

/// 호출 측에서 사용하는 캐시 인터페이스
pub trait MetricsCache<T: Clone> {
    fn get(&mut self, key: &InputFingerprint) -> Option<T>;

    fn put(&mut self, key: InputFingerprint, value: T);

    /// 캐시에 있으면 반환하고, 없으면 계산 후 저장
    fn get_or_compute<F>(&mut self, key: InputFingerprint, compute: F) -> T
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.put(key, value.clone());
        value
    }
}

/// TTL 기반 메모리 캐시
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: HashMap<InputFingerprint, (Instant, T)>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        TtlCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 만료된 항목 제거
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, (stored, _)| stored.elapsed() < ttl);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Clone> MetricsCache<T> for TtlCache<T> {
    fn get(&mut self, key: &InputFingerprint) -> Option<T> {
        let expired = match self.entries.get(key) {
            Some((stored, _)) => stored.elapsed() >= self.ttl,
            None => return None,
        };

        if expired {
            log::debug!("캐시 만료: 거래 {}건", key.count);
            self.entries.remove(key);
            return None;
        }

        log::trace!("캐시 적중: 거래 {}건", key.count);
        self.entries.get(key).map(|(_, value)| value.clone())
    }

    /// 저장 전에 만료된 항목을 정리한다
    fn put(&mut self, key: InputFingerprint, value: T) {
        self.purge_expired();
        self.entries.insert(key, (Instant::now(), value));
    }
}
