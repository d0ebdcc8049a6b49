use std::path::Path;

use crate::error::Result;
use crate::models::MenuItemCandidate;

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write menu items and their nutrition to a CSV file.
pub fn write_menu_csv(items: &[&MenuItemCandidate], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "id", "name", "category", "course", "calories", "protein", "carbs", "fat", "fiber",
        "sugar", "sodium",
    ])?;

    for item in items {
        let n = item.nutrition.as_ref();
        wtr.write_record([
            item.id.to_string(),
            item.name.clone(),
            item.category.clone().unwrap_or_default(),
            item.course.clone().unwrap_or_default(),
            cell(n.and_then(|n| n.calories)),
            cell(n.and_then(|n| n.protein)),
            cell(n.and_then(|n| n.carbs)),
            cell(n.and_then(|n| n.fat)),
            cell(n.and_then(|n| n.fiber)),
            cell(n.and_then(|n| n.sugar)),
            cell(n.and_then(|n| n.sodium)),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrition;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_menu_csv() {
        let items = vec![
            MenuItemCandidate {
                id: 3,
                name: "Grilled Chicken".to_string(),
                category: Some("Entree".to_string()),
                course: None,
                nutrition: Some(Nutrition {
                    calories: Some(300),
                    protein: Some(40.0),
                    ..Default::default()
                }),
            },
            MenuItemCandidate {
                id: 4,
                name: "Bread, Sourdough".to_string(),
                category: None,
                course: None,
                nutrition: None,
            },
        ];
        let refs: Vec<&MenuItemCandidate> = items.iter().collect();

        let file = NamedTempFile::new().unwrap();
        write_menu_csv(&refs, file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "id,name,category,course,calories,protein,carbs,fat,fiber,sugar,sodium");
        assert_eq!(lines[1], "3,Grilled Chicken,Entree,,300,40,,,,,");
        assert_eq!(lines[2], "4,\"Bread, Sourdough\",,,,,,,,,");
    }
}
