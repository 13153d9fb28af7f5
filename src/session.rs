//! フレーム供給元からカウンタへ流す逐次ループ

use anyhow::Result;

use crate::counter::{FrameReport, RepCounter};
use crate::source::LandmarkSource;

/// 画面・ログ向けの表示行（案内 + レップ数）
pub fn report_lines(report: &FrameReport) -> Vec<String> {
    let mut lines: Vec<String> = report.feedback.iter().map(|f| f.to_string()).collect();
    lines.push(format!("Squats: {}", report.rep_count));
    lines
}

/// 供給元が尽きるまで1フレームずつ処理し、最終レップ数を返す
pub fn run_session<S, F>(source: &mut S, counter: &mut RepCounter, mut on_frame: F) -> Result<u32>
where
    S: LandmarkSource + ?Sized,
    F: FnMut(&FrameReport) -> Result<()>,
{
    let mut frames = 0u64;
    while let Some(observation) = source.next_observation()? {
        let report = counter.process(&observation);
        on_frame(&report)?;
        frames += 1;
    }
    tracing::info!(frames, reps = counter.rep_count(), "session finished");
    Ok(counter.rep_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::rep_counter::tests::pose_with_angles;
    use crate::source::{Observation, ReplaySource};
    use std::collections::VecDeque;
    use std::io::Cursor;

    struct Scripted(VecDeque<Observation>);

    impl LandmarkSource for Scripted {
        fn next_observation(&mut self) -> Result<Option<Observation>> {
            Ok(self.0.pop_front())
        }
    }

    fn scripted(angles: &[Option<(f32, f32)>]) -> Scripted {
        Scripted(
            angles
                .iter()
                .map(|a| match a {
                    Some((l, r)) => Observation::Landmarks(pose_with_angles(Some(*l), Some(*r))),
                    None => Observation::NoPerson,
                })
                .collect(),
        )
    }

    #[test]
    fn test_run_session_counts_reps() {
        let mut source = scripted(&[
            Some((170.0, 172.0)),
            Some((130.0, 128.0)),
            Some((90.0, 95.0)),
            None,
            Some((160.0, 165.0)),
            Some((80.0, 82.0)),
        ]);
        let mut counter = RepCounter::default();
        let mut counts = Vec::new();

        let reps = run_session(&mut source, &mut counter, |report| {
            counts.push(report.rep_count);
            Ok(())
        })
        .unwrap();

        assert_eq!(reps, 2);
        assert_eq!(counts, vec![0, 0, 1, 1, 1, 2]);
    }

    #[test]
    fn test_sink_error_stops_session() {
        let mut source = scripted(&[Some((170.0, 170.0)), Some((90.0, 90.0))]);
        let mut counter = RepCounter::default();
        let result = run_session(&mut source, &mut counter, |_| anyhow::bail!("display closed"));
        assert!(result.is_err());
        assert_eq!(counter.rep_count(), 0);
    }

    #[test]
    fn test_report_lines() {
        let mut counter = RepCounter::default();
        let report = counter.process(&Observation::Landmarks(pose_with_angles(None, Some(170.0))));
        assert_eq!(report_lines(&report), vec!["left leg not detected", "Squats: 0"]);

        let report = counter.process(&Observation::Landmarks(pose_with_angles(Some(90.0), Some(90.0))));
        assert_eq!(report_lines(&report), vec!["rep confirmed", "Squats: 1"]);
    }

    #[test]
    fn test_sample_recording() {
        let mut source = ReplaySource::new(Cursor::new(include_str!("../data/sample_session.jsonl")));
        let mut counter = RepCounter::default();
        let mut lines = Vec::new();

        let reps = run_session(&mut source, &mut counter, |report| {
            lines.extend(report_lines(report));
            Ok(())
        })
        .unwrap();

        assert_eq!(reps, 2);
        assert!(lines.iter().any(|l| l == "please step into frame"));
        assert!(lines.iter().any(|l| l == "fully extend left leg"));
        assert_eq!(lines.iter().filter(|l| *l == "rep confirmed").count(), 2);
    }
}
