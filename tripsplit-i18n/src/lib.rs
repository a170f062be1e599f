#[cfg(all(feature = "zh", feature = "en"))]
compile_error!("Cannot enable both 'zh' and 'en' features at the same time");

#[cfg(feature = "zh")]
pub mod strings {
    pub const PERSON: &str = "成员";
    pub const PAID: &str = "已付";
    pub const OWED: &str = "应付";
    pub const BALANCE: &str = "余额";
    pub const FROM: &str = "付款人";
    pub const TO: &str = "收款人";
    pub const AMOUNT: &str = "金额";
    pub const DATE: &str = "日期";
    pub const TIME: &str = "时间";
    pub const DESCRIPTION: &str = "描述";
    pub const CATEGORY: &str = "类别";
    pub const PAID_BY: &str = "付款人";
    pub const SPLIT_AMONG: &str = "分摊人";
    pub const SPLIT_TYPE: &str = "分摊方式";
    pub const COUNT: &str = "笔数";
    pub const SHARE: &str = "占比";
    pub const TOTAL: &str = "总计";
    pub const AVERAGE: &str = "人均";
    pub const PAID_SHARE: &str = "付款占比";
    pub const OWED_SHARE: &str = "应付占比";
    pub const ALL_SETTLED: &str = "已全部结清";
    pub const NO_EXPENSES: &str = "暂无支出";
    pub const UNSUPPORTED_CURRENCY: &str = "币种不受支持，未计入余额";
    pub const REJECTED_SPLIT: &str = "自定义分摊未覆盖总额，未计入余额";
}

#[cfg(any(feature = "en", not(feature = "zh")))]
pub mod strings {
    pub const PERSON: &str = "Person";
    pub const PAID: &str = "Paid";
    pub const OWED: &str = "Owed";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const DATE: &str = "Date";
    pub const TIME: &str = "Time";
    pub const DESCRIPTION: &str = "Description";
    pub const CATEGORY: &str = "Category";
    pub const PAID_BY: &str = "Paid by";
    pub const SPLIT_AMONG: &str = "Split among";
    pub const SPLIT_TYPE: &str = "Split";
    pub const COUNT: &str = "Count";
    pub const SHARE: &str = "Share";
    pub const TOTAL: &str = "Total";
    pub const AVERAGE: &str = "Average per person";
    pub const PAID_SHARE: &str = "Paid %";
    pub const OWED_SHARE: &str = "Owed %";
    pub const ALL_SETTLED: &str = "All settled up";
    pub const NO_EXPENSES: &str = "No expenses yet";
    pub const UNSUPPORTED_CURRENCY: &str = "Unsupported currency, left out of balances";
    pub const REJECTED_SPLIT: &str = "Custom split does not cover the total, left out of balances";
}

pub use strings::*;

#[cfg(feature = "zh")]
pub fn ledger_heading(currency: impl std::fmt::Display) -> String {
    format!("{currency} 账本")
}

#[cfg(any(feature = "en", not(feature = "zh")))]
pub fn ledger_heading(currency: impl std::fmt::Display) -> String {
    format!("{currency} ledger")
}

#[cfg(feature = "zh")]
pub fn expense_added(id: impl std::fmt::Display) -> String {
    format!("已添加支出 {id}")
}

#[cfg(any(feature = "en", not(feature = "zh")))]
pub fn expense_added(id: impl std::fmt::Display) -> String {
    format!("Added expense {id}")
}

#[cfg(feature = "zh")]
pub fn expense_deleted(id: impl std::fmt::Display) -> String {
    format!("已删除支出 {id}")
}

#[cfg(any(feature = "en", not(feature = "zh")))]
pub fn expense_deleted(id: impl std::fmt::Display) -> String {
    format!("Deleted expense {id}")
}

#[cfg(feature = "zh")]
pub fn synced(count: usize) -> String {
    format!("同步完成，共 {count} 笔支出")
}

#[cfg(any(feature = "en", not(feature = "zh")))]
pub fn synced(count: usize) -> String {
    format!("Synced {count} expenses")
}

#[cfg(feature = "zh")]
pub fn imported(count: usize) -> String {
    format!("已导入 {count} 笔支出")
}

#[cfg(any(feature = "en", not(feature = "zh")))]
pub fn imported(count: usize) -> String {
    format!("Imported {count} expenses")
}
