pub mod exam;
pub mod loaders;
pub mod plan;
pub mod subject;

pub use exam::{coerce_grade, ExamConfig, GeneratedExam, ModelType, OutputFormat};
pub use loaders::{load_plan_file, parse_plan_toml};
pub use plan::{
    coerce_count, partition, seed_plan, DifficultyLevel, LevelDistribution, PlanAggregate,
    PlanId, QuestionType, QuotaReport, TopicPlan, TopicPlanEntry,
};
pub use subject::{Subject, SubjectFamily};
