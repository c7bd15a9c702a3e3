//! 预导入模块，方便使用

pub use super::admins::{ActiveModel as AdminActiveModel, Entity as Admins, Model as AdminModel};
pub use super::categories::{
    ActiveModel as CategoryActiveModel, Entity as Categories, Model as CategoryModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::criteria::{
    ActiveModel as CriteriaActiveModel, Entity as Criteria, Model as CriteriaModel,
};
pub use super::event_participations::{
    ActiveModel as EventParticipationActiveModel, Entity as EventParticipations,
    Model as EventParticipationModel,
};
pub use super::events::{ActiveModel as EventActiveModel, Entity as Events, Model as EventModel};
pub use super::faculties::{
    ActiveModel as FacultyActiveModel, Entity as Faculties, Model as FacultyModel,
};
pub use super::manual_scores::{
    ActiveModel as ManualScoreActiveModel, Entity as ManualScores, Model as ManualScoreModel,
};
pub use super::semesters::{
    ActiveModel as SemesterActiveModel, Entity as Semesters, Model as SemesterModel,
};
pub use super::student_assessments::{
    ActiveModel as StudentAssessmentActiveModel, Entity as StudentAssessments,
    Model as StudentAssessmentModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
