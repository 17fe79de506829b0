use chrono::{DateTime, Utc};
use tutor_core::model::QuizResult;

use crate::vm::time_fmt::{format_datetime, format_elapsed, format_local_time};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultTier {
    Perfect,
    Passed,
    KeepGoing,
}

impl ResultTier {
    #[must_use]
    pub fn from_result(result: &QuizResult) -> Self {
        if result.is_perfect() {
            Self::Perfect
        } else if result.score * 2 >= result.total {
            Self::Passed
        } else {
            Self::KeepGoing
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Perfect => "挑战大成功! 🎉",
            Self::Passed | Self::KeepGoing => "挑战完成!",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => {
                "哇！你已经完全掌握了这个知识点！你的努力得到了回报，继续保持这份热情！你是最棒的！ 🌟"
            }
            Self::Passed => {
                "不错哦！你已经迈出了重要的一步。再回顾一下错题解析，相信下次你一定能全对！加油！ 💪"
            }
            Self::KeepGoing => {
                "没关系，错题正是进步的机会！再看一遍老师的解析，然后拍一道新题继续练习吧！ 📚"
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub tier: ResultTier,
    pub score: u32,
    pub total: u32,
    pub percent_label: String,
    pub completed_label: String,
    pub completed_iso: String,
    pub elapsed_label: String,
}

/// `started_at` is when the session began, so the elapsed time covers the whole cycle.
#[must_use]
pub fn map_result(result: &QuizResult, started_at: DateTime<Utc>) -> ResultVm {
    ResultVm {
        tier: ResultTier::from_result(result),
        score: result.score,
        total: result.total,
        percent_label: format!("{}%", result.percent()),
        completed_label: format_local_time(result.completed_at),
        completed_iso: format_datetime(result.completed_at),
        elapsed_label: format_elapsed(result.completed_at - started_at),
    }
}
