/// Заголовок SIGPROC filterbank файла.
///
/// Каждое поле соответствует одному тегу потока (см. [`crate::HeaderTag`]),
/// кроме `nsamps`: оно не записывается в файл и вычисляется при чтении из
/// размера файла.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilHeader {
    /// Имя исходного файла сырых данных (`rawdatafile`)
    pub rawfile: String,
    /// Имя источника (`source_name`)
    pub sourcename: String,
    /// ID бэкенда (`machine_id`)
    pub machineid: i32,
    /// ID телескопа (`telescope_id`)
    pub telescopeid: i32,
    /// Прямое восхождение источника, hhmmss.s (`src_raj`)
    pub ra: f64,
    /// Склонение источника, ddmmss.s (`src_dej`)
    pub dec: f64,
    /// Азимут в градусах (`az_start`)
    pub az: f64,
    /// Зенитный угол в градусах (`za_start`)
    pub zn: f64,
    /// Тип данных (`data_type`)
    pub datatype: i32,
    /// Опорная мера дисперсии (`refdm`)
    pub rdm: f64,
    /// Количество частотных каналов (`nchans`)
    pub nchans: i32,
    /// Частота первого канала, МГц (`fch1`)
    pub topfreq: f64,
    /// Ширина канала, МГц (`foff`)
    pub chanband: f64,
    /// Количество лучей (`nbeams`)
    pub nbeams: i32,
    /// Номер луча (`ibeam`)
    pub ibeam: i32,
    /// Бит на выборку (`nbits`)
    pub nbits: i32,
    /// Время начала наблюдения, MJD (`tstart`)
    pub tstart: f64,
    /// Интервал дискретизации, с (`tsamp`)
    pub tsamp: f64,
    /// Количество IF каналов (`nifs`)
    pub nifs: i32,
    /// Количество временных выборок на канал (не хранится в потоке)
    pub nsamps: u64,
}

impl FilHeader {
    /// Размер области данных в байтах: `nsamps * nchans * nbits / 8`.
    ///
    /// Целочисленная арифметика слева направо. `None`, если `nchans` или
    /// `nbits` отрицательны или произведение не помещается в `u64`.
    pub fn data_size(&self) -> Option<u64> {
        let nchans = u64::try_from(self.nchans).ok()?;
        let nbits = u64::try_from(self.nbits).ok()?;

        Some(self.nsamps.checked_mul(nchans)?.checked_mul(nbits)? / 8)
    }

    /// Полная полоса в МГц (`nchans * foff`, знак как у `foff`).
    pub fn bandwidth(&self) -> f64 {
        self.nchans as f64 * self.chanband
    }

    /// Длительность записи в секундах.
    pub fn duration_secs(&self) -> f64 {
        self.nsamps as f64 * self.tsamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let h = FilHeader::default();

        assert!(h.rawfile.is_empty());
        assert!(h.sourcename.is_empty());
        assert_eq!(h.nsamps, 0);
        assert_eq!(h.data_size(), Some(0));
    }

    #[test]
    fn test_data_size() {
        let h = FilHeader {
            nchans: 128,
            nbits: 8,
            nsamps: 1000,
            ..Default::default()
        };
        assert_eq!(h.data_size(), Some(128_000));

        // 2 бита: 4 выборки в байте
        let h = FilHeader {
            nchans: 64,
            nbits: 2,
            nsamps: 10,
            ..Default::default()
        };
        assert_eq!(h.data_size(), Some(160));

        let bad = FilHeader {
            nchans: -1,
            nbits: 8,
            nsamps: 10,
            ..Default::default()
        };
        assert_eq!(bad.data_size(), None);
    }

    #[test]
    fn test_bandwidth_and_duration() {
        let h = FilHeader {
            nchans: 128,
            chanband: -0.390625,
            nsamps: 1000,
            tsamp: 0.000064,
            ..Default::default()
        };

        assert_eq!(h.bandwidth(), -50.0);
        assert!((h.duration_secs() - 0.064).abs() < 1e-12);
    }
}
