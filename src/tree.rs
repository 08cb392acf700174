pub trait TreeOps<K, V> {
    fn add(&mut self, key: K, value: V);
    fn remove(&mut self, key: &K);
    fn contains(&self, key: &K) -> bool;
    fn count(&self, key: &K) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
