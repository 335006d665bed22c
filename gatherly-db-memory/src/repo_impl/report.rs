use super::*;

fn open_key(report: &Report) -> (Id, ReportTarget) {
    (report.reporter_id.clone(), report.target.clone())
}

fn create_report(data: &mut Collections, report: Report) -> Result<()> {
    if data.reports.contains_key(&report.id) {
        return Err(repo::Error::AlreadyExists);
    }
    if report.status.is_open() {
        let key = open_key(&report);
        if data.open_reports.contains_key(&key) {
            return Err(repo::Error::AlreadyExists);
        }
        data.open_reports.insert(key, report.id.clone());
    }
    data.reports.insert(report.id.clone(), report);
    Ok(())
}

fn update_report(data: &mut Collections, report: &Report) -> Result<()> {
    let old = data.reports.get(&report.id).ok_or(repo::Error::NotFound)?;
    if old.status.is_open() && !report.status.is_open() {
        data.open_reports.remove(&open_key(old));
    } else if !old.status.is_open() && report.status.is_open() {
        let key = open_key(report);
        if data.open_reports.contains_key(&key) {
            return Err(repo::Error::AlreadyExists);
        }
        data.open_reports.insert(key, report.id.clone());
    }
    data.reports.insert(report.id.clone(), report.clone());
    Ok(())
}

impl ReportRepo for DbConnection<'_> {
    fn create_report(&self, report: Report) -> Result<()> {
        self.write(|data| create_report(data, report))
    }
    fn update_report(&self, report: &Report) -> Result<()> {
        self.write(|data| update_report(data, report))
    }

    fn get_report(&self, id: &Id) -> Result<Report> {
        self.read(|data| data.reports.get(id).cloned())
            .ok_or(repo::Error::NotFound)
    }
    fn try_get_open_report(
        &self,
        reporter_id: &Id,
        target: &ReportTarget,
    ) -> Result<Option<Report>> {
        Ok(self.read(|data| {
            data.open_reports
                .get(&(reporter_id.clone(), target.clone()))
                .and_then(|id| data.reports.get(id))
                .cloned()
        }))
    }
    fn load_open_reports(&self, pagination: &Pagination) -> Result<Vec<Report>> {
        let mut reports: Vec<_> = self.read(|data| {
            data.open_reports
                .values()
                .filter_map(|id| data.reports.get(id))
                .cloned()
                .collect()
        });
        reports.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(pagination.apply(reports))
    }
    fn count_open_reports(&self) -> Result<usize> {
        Ok(self.read(|data| data.open_reports.len()))
    }
}
