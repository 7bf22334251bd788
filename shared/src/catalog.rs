//! 院系 -> 专业 目录，驱动级联下拉框

pub struct Department {
    pub name: &'static str,
    pub programs: &'static [&'static str],
}

pub const DEPARTMENTS: &[Department] = &[
    Department {
        name: "Computer Applications",
        programs: &["MCA", "BCA"],
    },
    Department {
        name: "Computer Science",
        programs: &["B.Tech CSE", "M.Tech CSE"],
    },
    Department {
        name: "Electronics",
        programs: &["B.Tech ECE", "M.Tech VLSI"],
    },
    Department {
        name: "Management",
        programs: &["MBA", "BBA"],
    },
];

pub fn department_names() -> impl Iterator<Item = &'static str> {
    DEPARTMENTS.iter().map(|d| d.name)
}

/// 某院系下的专业列表，未知院系返回空列表
pub fn programs_for(department: &str) -> &'static [&'static str] {
    DEPARTMENTS
        .iter()
        .find(|d| d.name == department)
        .map(|d| d.programs)
        .unwrap_or(&[])
}

/// 级联选择状态：院系变化时重新计算专业选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramSelection {
    department: String,
    programs: Vec<String>,
}

impl ProgramSelection {
    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn programs(&self) -> &[String] {
        &self.programs
    }

    /// 当前院系可选的专业
    pub fn options(&self) -> &'static [&'static str] {
        programs_for(&self.department)
    }

    /// 切换院系，丢弃不属于新院系的已选专业
    pub fn select_department(&mut self, department: &str) {
        self.department = department.to_string();
        let options = programs_for(department);
        self.programs.retain(|p| options.contains(&p.as_str()));
    }

    /// 勾选/取消勾选专业，不在当前选项中的专业忽略
    pub fn toggle_program(&mut self, program: &str) {
        if !self.options().contains(&program) {
            return;
        }
        if let Some(pos) = self.programs.iter().position(|p| p == program) {
            self.programs.remove(pos);
        } else {
            self.programs.push(program.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_department_has_no_programs() {
        assert!(programs_for("Astrology").is_empty());
    }

    #[test]
    fn test_changing_department_recomputes_options() {
        let mut sel = ProgramSelection::default();
        sel.select_department("Computer Applications");
        sel.toggle_program("MCA");
        assert_eq!(sel.programs(), ["MCA".to_string()]);

        sel.select_department("Management");
        assert_eq!(sel.options(), ["MBA", "BBA"]);
        assert!(sel.programs().is_empty());
    }

    #[test]
    fn test_toggle_ignores_foreign_programs() {
        let mut sel = ProgramSelection::default();
        sel.select_department("Management");
        sel.toggle_program("MCA");
        assert!(sel.programs().is_empty());
        sel.toggle_program("MBA");
        sel.toggle_program("MBA");
        assert!(sel.programs().is_empty());
    }
}
