//! 命题矩阵存储 - 流程层
//!
//! 会话内唯一的矩阵状态。所有修改都通过显式命令完成，
//! 每个命令在下一个命令开始前执行完毕。

use tracing::debug;

use crate::models::plan::{
    DifficultyLevel, LevelDistribution, PlanAggregate, PlanId, QuestionType, QuotaReport,
    TopicPlan, TopicPlanEntry,
};

/// 单字段编辑
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEdit {
    SetTopic(PlanId, String),
    SetType(PlanId, QuestionType),
    /// 存储层不做范围校验，收敛由输入端负责
    SetCount(PlanId, u32),
    SetLevel(PlanId, DifficultyLevel),
}

impl PlanEdit {
    pub fn id(&self) -> &PlanId {
        match self {
            PlanEdit::SetTopic(id, _)
            | PlanEdit::SetType(id, _)
            | PlanEdit::SetCount(id, _)
            | PlanEdit::SetLevel(id, _) => id,
        }
    }
}

/// 矩阵命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanCommand {
    Add,
    Edit(PlanEdit),
    Remove(PlanId),
    /// 整体替换（推荐结果）
    Replace(TopicPlan),
}

/// 命题矩阵存储
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanStore {
    entries: TopicPlan,
}

impl PlanStore {
    pub fn new(entries: TopicPlan) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TopicPlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &PlanId) -> Option<&TopicPlanEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// 执行一条命令
    pub fn apply(&mut self, command: PlanCommand) {
        match command {
            PlanCommand::Add => {
                self.add();
            }
            PlanCommand::Edit(edit) => self.update(edit),
            PlanCommand::Remove(id) => self.remove(&id),
            PlanCommand::Replace(plan) => self.replace(plan),
        }
    }

    /// 追加一行默认记录，返回新 id
    pub fn add(&mut self) -> PlanId {
        let mut entry = TopicPlanEntry::blank();
        while self.get(&entry.id).is_some() {
            entry.id = PlanId::generate();
        }
        let id = entry.id.clone();
        self.entries.push(entry);
        debug!("新增矩阵记录: {}", id);
        id
    }

    /// 修改一个字段；id 不存在时不做任何事
    pub fn update(&mut self, edit: PlanEdit) {
        let Some(entry) = self.entries.iter_mut().find(|entry| &entry.id == edit.id()) else {
            debug!("矩阵记录不存在，忽略编辑: {}", edit.id());
            return;
        };

        match edit {
            PlanEdit::SetTopic(_, topic) => entry.topic = topic,
            PlanEdit::SetType(_, question_type) => entry.question_type = question_type,
            PlanEdit::SetCount(_, count) => entry.count = count,
            PlanEdit::SetLevel(_, level) => entry.level = level,
        }
    }

    /// 删除记录；删空是合法状态
    pub fn remove(&mut self, id: &PlanId) {
        self.entries.retain(|entry| &entry.id != id);
    }

    /// 整体替换，不做合并
    pub fn replace(&mut self, plan: TopicPlan) {
        self.entries = plan;
    }

    /// 题量汇总（每次重新计算）
    pub fn aggregate(&self) -> PlanAggregate {
        PlanAggregate::from_plan(&self.entries)
    }

    pub fn level_distribution(&self) -> LevelDistribution {
        LevelDistribution::from_plan(&self.entries)
    }

    pub fn quota_report(&self) -> QuotaReport {
        QuotaReport::from_aggregate(&self.aggregate())
    }
}
