//! 评分大类 / 标准层级结构

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::criteria::entities::{Category, Criteria};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: Category,
    pub criteria: Vec<Criteria>,
}

/// 生效中的评分结构
///
/// 只包含启用的大类与标准，大类按 `order` 排序，标准在大类内按 `order` 排序（相同时按 id）。
/// 所属大类未启用或不存在的标准会被丢弃。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriteriaStructure {
    pub categories: Vec<CategoryNode>,
}

impl CriteriaStructure {
    pub fn build(categories: Vec<Category>, criteria: Vec<Criteria>) -> Self {
        let mut categories: Vec<Category> =
            categories.into_iter().filter(|c| c.is_active).collect();
        categories.sort_by_key(|c| (c.order, c.id));

        let mut grouped: HashMap<i64, Vec<Criteria>> = HashMap::new();
        for item in criteria.into_iter().filter(|c| c.is_active) {
            grouped.entry(item.category_id).or_default().push(item);
        }

        let categories = categories
            .into_iter()
            .map(|category| {
                let mut criteria = grouped.remove(&category.id).unwrap_or_default();
                criteria.sort_by_key(|c| (c.order, c.id));
                CategoryNode { category, criteria }
            })
            .collect();

        Self { categories }
    }

    /// 按 id 查找标准及其所属大类
    pub fn find_criteria(&self, criteria_id: i64) -> Option<(&Category, &Criteria)> {
        self.categories.iter().find_map(|node| {
            node.criteria
                .iter()
                .find(|c| c.id == criteria_id)
                .map(|c| (&node.category, c))
        })
    }

    pub fn criteria_count(&self) -> usize {
        self.categories.iter().map(|n| n.criteria.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{category, criteria};
    use crate::models::criteria::entities::ScoringType;

    #[test]
    fn test_orders_categories_and_criteria() {
        let structure = CriteriaStructure::build(
            vec![category(2, 2, 25.0), category(1, 1, 20.0)],
            vec![
                criteria(12, 1, 2, ScoringType::Manual),
                criteria(11, 1, 1, ScoringType::Auto),
                criteria(21, 2, 1, ScoringType::Manual),
                criteria(13, 1, 1, ScoringType::Manual),
            ],
        );

        let ids: Vec<i64> = structure.categories.iter().map(|n| n.category.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let first: Vec<i64> = structure.categories[0].criteria.iter().map(|c| c.id).collect();
        assert_eq!(first, vec![11, 13, 12]);
        assert_eq!(structure.criteria_count(), 4);
    }

    #[test]
    fn test_drops_inactive_and_orphaned_criteria() {
        let mut hidden = category(3, 3, 10.0);
        hidden.is_active = false;
        let mut retired = criteria(14, 1, 4, ScoringType::Manual);
        retired.is_active = false;

        let structure = CriteriaStructure::build(
            vec![category(1, 1, 20.0), hidden],
            vec![
                criteria(11, 1, 1, ScoringType::Manual),
                retired,
                criteria(31, 3, 1, ScoringType::Manual),
                criteria(99, 42, 1, ScoringType::Auto),
            ],
        );

        assert_eq!(structure.categories.len(), 1);
        assert_eq!(structure.criteria_count(), 1);
        assert!(structure.find_criteria(31).is_none());
        let (cat, crit) = structure.find_criteria(11).unwrap();
        assert_eq!((cat.id, crit.id), (1, 11));
    }
}
